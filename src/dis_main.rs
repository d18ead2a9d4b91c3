use anyhow::bail;
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::file_input_util;
use crate::file_output_util::Writer;
use crate::lib::disassemble;
use crate::lib::AssemblerOptions;
use crate::lib::DisassemblerOptions;

#[derive(Parser)]
pub struct DisassemblerCli {
    input: PathBuf,
    #[clap(short, long, parse(from_os_str))]
    out: PathBuf,

    /// Internal name of the generated class
    #[clap(long, default_value = "Main")]
    class: String,

    #[clap(long = "super", default_value = "java/lang/Object")]
    superclass: String,

    #[clap(long, default_value = "main")]
    method: String,

    #[clap(long, default_value_t = 16)]
    stack: u16,
}

pub fn disassembler_main(cli: DisassemblerCli) -> Result<()> {
    let opts = DisassemblerOptions {
        class_name: cli.class,
        superclass: Some(cli.superclass),
        method_name: cli.method,
        max_stack: cli.stack,
    };

    let mut writer = Writer::new(&cli.out)?;
    let mut error_count = 0;
    file_input_util::read_files(&cli.input, "jasm", |fname, data| {
        println!("disassemble {}", fname);
        let (name, out) = match disassemble(data, AssemblerOptions::default(), &opts) {
            Ok(v) => v,
            Err(err) => {
                err.display(fname, data);
                error_count += 1;
                return Ok(());
            }
        };
        writer.write(&format!("{}.j", name), &out)?;
        Ok(())
    })?;
    writer.finish()?;

    if error_count > 0 {
        bail!("Finished with {} errors", error_count);
    }
    Ok(())
}
