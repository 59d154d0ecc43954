use anyhow::Result;

mod app;
mod logging;

fn main() -> Result<()> {
    let args = dirsync::cli::parse();
    app::run(args)
}
