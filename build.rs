use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=pages/");

    let out_dir = env::var("OUT_DIR").unwrap();
    let dest_path = Path::new(&out_dir).join("embedded_pages.rs");
    let mut f = fs::File::create(&dest_path).unwrap();

    let pages_dir = Path::new("pages");
    if !pages_dir.exists() {
        writeln!(f, "pub const EMBEDDED_PAGES: &[(&str, &str)] = &[];").unwrap();
        return;
    }

    let mut entries: Vec<_> = fs::read_dir(pages_dir)
        .unwrap()
        .map(|res| res.unwrap().path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "html"))
        .collect();

    // Stable output keeps the generated file identical between builds.
    entries.sort();

    writeln!(f, "pub const EMBEDDED_PAGES: &[(&str, &str)] = &[").unwrap();
    for path in entries {
        let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let absolute = fs::canonicalize(&path).unwrap();
        println!("cargo:rerun-if-changed={}", path.display());
        writeln!(f, "    ({:?}, include_str!({:?})),", id, absolute.display().to_string()).unwrap();
    }
    writeln!(f, "];").unwrap();
}
