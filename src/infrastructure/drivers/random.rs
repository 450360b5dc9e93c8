use esp_hal::rng::Rng;

/// 64-bit seed from the hardware RNG
///
/// The RNG is only truly random while the radio is running, which does
/// not matter for seeding animations.
pub fn get_seed() -> u64 {
    let rng = Rng::new();
    (u64::from(rng.random()) << 32) | u64::from(rng.random())
}
