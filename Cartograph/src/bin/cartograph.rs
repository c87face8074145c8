fn main() -> anyhow::Result<()> {
    cartograph::cli::run_cli()
}
