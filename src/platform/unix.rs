use crate::platform::PlatformOps;

pub static UNIX_PLATFORM: Unix = Unix;

pub struct Unix;

impl PlatformOps for Unix {
    fn final_binary_name(&self, base: &str) -> String {
        base.to_string()
    }
}
