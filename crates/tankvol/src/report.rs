use tank_gems::TankVolume;

const SEPARATOR_WIDTH: usize = 50;

/// Console report for a tank volume, one entry per line
pub fn report_lines(volume: &TankVolume) -> [String; 4] {
    [
        format!("Sphere part volume is {:>19.2} m\u{b3}", volume.sphere),
        format!("Cylinder part volume is {:>18.2} m\u{b3}", volume.cylinder),
        "-".repeat(SEPARATOR_WIDTH),
        format!(
            "Total volume occupied by water is {:>8.2} m\u{b3}",
            volume.total
        ),
    ]
}
