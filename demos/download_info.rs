//! Example: Write a download-info file and list mirror links
//!
//! This example demonstrates the offline half of the library: mirror URLs
//! for a package, the info file written by `MirrorWriter`, and listing the
//! output directory. No network access is needed.
//!
//! Usage: cargo run --example download_info [package_id] [version]

use apk_hub::{Config, MirrorWriter, mirror_links};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let package_id = if args.len() > 1 {
        args[1].clone()
    } else {
        "org.videolan.vlc".to_string()
    };
    let version = args.get(2).map(String::as_str);

    println!("Mirror links for {}:", package_id);
    for (mirror, url) in mirror_links(&package_id) {
        println!("  {:<10} {}", mirror, url);
    }

    let config = Config::load();
    config.ensure_download_dir()?;
    let writer = MirrorWriter::new(&config);

    let path = writer.write_download_info(&package_id, None, version)?;
    println!("\nWrote {}\n", path.display());
    println!("{}", std::fs::read_to_string(&path)?);

    let files = writer.list_downloads()?;
    println!("{} file(s) in {}:", files.len(), writer.download_dir().display());
    for file in &files {
        println!("  {}", file.display());
    }

    Ok(())
}
