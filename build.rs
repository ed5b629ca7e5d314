//! Retrieves information about the version of the engine from Git and the build
//! environment. It is printed in the startup banner.

fn main() -> shadow_rs::SdResult<()> {
    shadow_rs::new()
}
