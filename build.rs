fn main() -> shadow_rs::SdResult<()> {
    // exposes build metadata to the CLI through `shadow!(build)`
    shadow_rs::ShadowBuilder::builder().build()?;

    Ok(())
}
