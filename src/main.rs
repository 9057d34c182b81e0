fn main() -> anyhow::Result<()> {
    obamoid::run()
}
