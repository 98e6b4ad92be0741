//! Markdown catalogue of the generated logos
//!
//! File names are written verbatim. They must be URL-safe and free of `|`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::ReadmeConfig;

const HEADER: &str = r#"<h1 align="center">
    <a href="http://www.poz.unexpo.edu.ve"><img src="https://github.com/unexpo-poz/brand/blob/main/logo/standar/primary-2048.png" width="175px" alt="UNEXPO"></a>
</h1>
 
<h3 align="center">La Universidad Tecnica del Estado Venezolano.</h3>


[Regresar al directorio raiz](https://github.com/unexpo-poz/brand)

## Logos

### Nota 
Si algun logo no se visualiza correctamente, intenta cambiar el tema de Github de claro a oscuro o viceversa.

| Vista | Tamaño | Uso | Archivo |
|-------|--------|-----|---------|
"#;

/// `primary-1024.png` -> `1024`
pub fn size_label(file_name: &str) -> &str {
    let tail = file_name.rsplit('-').next().unwrap_or(file_name);
    tail.split('.').next().unwrap_or(tail)
}

fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

pub fn render_row(path: &str, base_url: &str) -> String {
    let name = base_name(path);
    format!(
        "|<img src='{base}{name}?raw=true' width='64' alt=''/> | {size}px | ✅ | [{name}]({base}{name}) |\n",
        base = base_url,
        name = name,
        size = size_label(name),
    )
}

pub fn render_readme<S: AsRef<str>>(files: &[S], base_url: &str) -> String {
    let mut content = String::from(HEADER);
    for file in files {
        content.push_str(&render_row(file.as_ref(), base_url));
    }
    content
}

/// Write the catalogue into `dir`, replacing any existing file
pub fn write_readme<S: AsRef<str>>(
    dir: &Path,
    files: &[S],
    config: &ReadmeConfig,
) -> io::Result<PathBuf> {
    let path = dir.join(&config.file_name);
    fs::write(&path, render_readme(files, &config.base_url))?;
    Ok(path)
}
