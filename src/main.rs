fn main() -> anyhow::Result<()> {
    block_world::run()
}
