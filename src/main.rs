use tidydir::cli::Cli;

fn main() -> anyhow::Result<()> {
    Cli::init()?.execute()
}
