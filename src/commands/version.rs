use anyhow::Result;

pub fn execute() -> Result<()> {
    println!("motdstats version {}", crate::VERSION);
    Ok(())
}
