use anyhow::Result;

fn main() -> Result<()> {
    readme_stats::cli::run()
}
