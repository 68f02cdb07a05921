fn main() -> anyhow::Result<()> {
    phyrekit::cli::run_cli()
}
