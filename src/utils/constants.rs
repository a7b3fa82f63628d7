/// Stations included in the combined reporting dataset by default.
///
/// The published report combines ten of the twelve PRSA stations; Wanliu and
/// Wanshouxigong stay out of the combined view but remain available
/// individually. Override with an explicit station list or the all-stations
/// selection.
pub const REPORT_STATIONS: [&str; 10] = [
    "Aotizhongxin",
    "Changping",
    "Dingling",
    "Dongsi",
    "Guanyuan",
    "Gucheng",
    "Huairou",
    "Nongzhanguan",
    "Shunyi",
    "Tiantan",
];

/// Read buffer for station CSV files
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
