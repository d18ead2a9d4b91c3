use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Call `cb` with the name and text of every listing in `p`, which is either a
/// single `.<ext>` file or a zip/jar archive containing them.
pub fn read_files(p: &Path, ext: &str, mut cb: impl FnMut(&str, &str) -> Result<()>) -> Result<()> {
    let input_ext = p
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("Missing input file extension for '{}'", p.display()))?;
    let input_ext = input_ext.to_ascii_lowercase();

    if input_ext == ext {
        let data = fs::read_to_string(p)?;
        cb(&p.to_string_lossy(), &data)?;
    } else if input_ext == "jar" || input_ext == "zip" {
        let mut inbuf = String::new();
        let file = fs::File::open(p)?;
        let mut zip = zip::ZipArchive::new(file)?;
        let ext = format!(".{}", ext);

        for i in 0..zip.len() {
            let mut file = zip.by_index(i)?;
            let name = file.name().to_owned();
            if !name.trim_end_matches('/').ends_with(&ext) {
                continue;
            }

            inbuf.clear();
            inbuf.reserve(file.size() as usize);
            file.read_to_string(&mut inbuf)
                .map_err(|err| anyhow!("{}: listings must be utf8-encoded ({})", name, err))?;

            cb(&name, &inbuf)?;
        }
    } else {
        bail!("Unsupported input extension {}", input_ext)
    }
    Ok(())
}
