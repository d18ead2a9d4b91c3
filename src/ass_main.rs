use anyhow::bail;
use anyhow::Result;
use clap::Parser;
use std::path::Path;
use std::path::PathBuf;

use crate::file_input_util;
use crate::file_output_util::Writer;
use crate::lib::assemble;
use crate::lib::format_listing;
use crate::lib::AssemblerOptions;

#[derive(Parser)]
pub struct AssemblerCli {
    input: PathBuf,
    #[clap(short, long, parse(from_os_str))]
    out: PathBuf,

    /// Report every bad line instead of stopping at the first one
    #[clap(short, long)]
    keep_going: bool,
}

fn file_name(fname: &str) -> String {
    Path::new(fname)
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| fname.to_owned())
}

pub fn assembler_main(cli: AssemblerCli) -> Result<()> {
    let opts = AssemblerOptions {
        keep_going: cli.keep_going,
    };

    let mut writer = Writer::new(&cli.out)?;
    let mut error_count = 0;
    file_input_util::read_files(&cli.input, "jasm", |fname, data| {
        let instrs = match assemble(data, opts) {
            Ok(instrs) => instrs,
            Err(err) => {
                err.display(fname, data);
                error_count += err.0.len();
                return Ok(());
            }
        };
        println!("got {} instructions", instrs.len());

        let out = format_listing(&instrs);
        let name = file_name(fname);
        writer.write(&name, &out)?;
        println!("Wrote {} bytes to {}", out.len(), name);
        Ok(())
    })?;
    writer.finish()?;

    if error_count > 0 {
        bail!("Finished with {} errors", error_count);
    }
    Ok(())
}
