fn main() -> anyhow::Result<()> {
    convbench::run()
}
