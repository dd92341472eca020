pub const fn length_from_millimeters(millimeters: f64) -> f64 {
    millimeters * 1e-3
}

pub fn volume_from_liters(liters: f64) -> f64 {
    liters * 1e-3
}

pub fn volume_to_liters(volume: f64) -> f64 {
    volume * 1e3
}
