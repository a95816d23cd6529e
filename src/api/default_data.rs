/// Fallback sample set used when a strip is created without data.
pub const DEFAULT_SAMPLES: [f64; 51] = [
    76067.0, 74444.0, 73702.0, 72935.0, 71977.0, 71755.0, 70954.0, 68485.0, 66149.0, 63783.0,
    63217.0, 62848.0, 62520.0, 62518.0, 61017.0, 60741.0, 59196.0, 59143.0, 59114.0, 58387.0,
    56104.0, 54895.0, 54727.0, 54610.0, 54570.0, 54384.0, 53571.0, 53270.0, 53094.0, 52078.0,
    51340.0, 51037.0, 50826.0, 50803.0, 50674.0, 50433.0, 49593.0, 49174.0, 48900.0, 48380.0,
    48256.0, 48038.0, 46898.0, 46574.0, 45674.0, 45652.0, 44811.0, 44758.0, 42644.0, 42336.0,
    40528.0,
];

#[must_use]
pub fn default_samples() -> Vec<f64> {
    DEFAULT_SAMPLES.to_vec()
}
