use anyhow::anyhow;
use anyhow::bail;
use anyhow::Result;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

pub enum Writer {
    Dir(PathBuf),
    Zip(zip::ZipWriter<fs::File>),
    Merged(fs::File),
}
impl Writer {
    pub fn new(p: &Path) -> Result<Self> {
        if let Some(parent) = p.parent() {
            fs::create_dir_all(parent)?;
        }
        if p.is_dir() {
            return Ok(Self::Dir(p.into()));
        }

        let ext = p.extension().and_then(|s| s.to_str());
        let kind = match ext.map(|s| s.to_ascii_lowercase()) {
            Some(s) if s == "jar" || s == "zip" => "zip",
            Some(s) if s == "jasm" || s == "j" || s == "txt" => "merged",
            _ => bail!("Unsupported output extension {:?}", ext),
        };

        let f = fs::File::create(p)?;
        Ok(if kind == "zip" {
            Self::Zip(zip::ZipWriter::new(f))
        } else {
            Self::Merged(f)
        })
    }

    pub fn write(&mut self, name: &str, data: &[u8]) -> Result<()> {
        use Writer::*;
        match self {
            Dir(dir) => {
                if name.contains("..") {
                    bail!("Invalid path {}. Try outputting to a zip file instead.", name)
                }
                let p = dir.join(name);
                println!("Writing to {}", p.display());
                let parent = p.parent().ok_or_else(|| anyhow!("Invalid path {}", p.display()))?;
                fs::create_dir_all(parent)?;
                fs::File::create(&p)?.write_all(data)?;
            }
            Zip(zw) => {
                let options = zip::write::FileOptions::default()
                    .compression_method(zip::CompressionMethod::Stored)
                    .last_modified_time(zip::DateTime::default());

                zw.start_file(name, options)?;
                zw.write_all(data)?;
            }
            Merged(f) => {
                f.write_all(data)?;
            }
        }
        Ok(())
    }

    pub fn finish(self) -> Result<()> {
        match self {
            Writer::Zip(mut zw) => {
                zw.finish()?;
            }
            Writer::Merged(mut f) => f.flush()?,
            Writer::Dir(_) => {}
        }
        Ok(())
    }
}
