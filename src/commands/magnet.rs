use anyhow::Result;

use crate::magnet::Magnet;

/// Parse a magnet link locally and print its parts
pub fn magnet(uri: &str) -> Result<()> {
    print!("{}", describe(&Magnet::parse(uri)?));
    Ok(())
}

fn describe(magnet: &Magnet) -> String {
    let mut out = format!("Hash: {}\nName: {}\n", magnet.hash, magnet.display_name);
    if magnet.trackers.is_empty() {
        out.push_str("Trackers: (none)\n");
    } else {
        out.push_str("Trackers:\n");
        for tracker in &magnet.trackers {
            out.push_str(&format!("  {}\n", tracker));
        }
    }
    out
}
