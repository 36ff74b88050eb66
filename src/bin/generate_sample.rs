use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const RUNS: usize = 6;

/// SplitMix64 stream: enough randomness for reproducible sample data.
struct Jitter {
    counter: u64,
}

impl Jitter {
    fn seeded(seed: u64) -> Self {
        Jitter { counter: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.counter = self.counter.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.counter;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roughly normal run-to-run noise: twelve uniforms summed (Irwin-Hall)
    /// have mean 6 and variance 1.
    fn around(&mut self, centre: f64, spread: f64) -> f64 {
        let z: f64 = (0..12).map(|_| self.unit()).sum::<f64>() - 6.0;
        centre + spread * z
    }
}

struct SampleRow {
    cluster: String,
    workload: String,
    block_size: String,
    runs: Vec<f64>,
}

/// Throughput (MB/s) of repeated benchmark runs, grouped by
/// cluster / workload / block size.
fn generate_rows(jitter: &mut Jitter) -> Vec<SampleRow> {
    let clusters = [("ssd-pool", 1.0), ("hdd-pool", 0.35)];
    let workloads = [("seq-read", 1.0), ("seq-write", 0.8), ("rand-read", 0.45)];
    let block_sizes = [("4k", 0.25), ("64k", 0.7), ("4m", 1.0)];

    let mut rows = Vec::new();
    for &(cluster, c_scale) in &clusters {
        for &(workload, w_scale) in &workloads {
            for &(bs, b_scale) in &block_sizes {
                let base = 900.0 * c_scale * w_scale * b_scale;
                let runs = (0..RUNS)
                    .map(|_| jitter.around(base, base * 0.08).max(0.0))
                    .map(|v| (v * 100.0).round() / 100.0)
                    .collect();
                rows.push(SampleRow {
                    cluster: cluster.to_string(),
                    workload: workload.to_string(),
                    block_size: bs.to_string(),
                    runs,
                });
            }
        }
    }
    rows
}

fn column_names() -> Vec<String> {
    let mut names = vec![
        "cluster".to_string(),
        "workload".to_string(),
        "block_size".to_string(),
    ];
    names.extend((1..=RUNS).map(|i| format!("run{i}")));
    names
}

fn write_csv(path: &str, rows: &[SampleRow]) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create CSV file");
    writer
        .write_record(column_names())
        .expect("Failed to write CSV header");
    for row in rows {
        let mut record = vec![
            row.cluster.clone(),
            row.workload.clone(),
            row.block_size.clone(),
        ];
        record.extend(row.runs.iter().map(|v| format!("{v:.2}")));
        writer.write_record(&record).expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV");
}

fn write_parquet(path: &str, rows: &[SampleRow]) {
    let names = column_names();
    let mut fields = Vec::with_capacity(names.len());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(names.len());

    let labels: [fn(&SampleRow) -> &str; 3] = [
        |r| r.cluster.as_str(),
        |r| r.workload.as_str(),
        |r| r.block_size.as_str(),
    ];
    for (name, get) in names.iter().zip(labels) {
        fields.push(Field::new(name, DataType::Utf8, false));
        columns.push(Arc::new(StringArray::from(
            rows.iter().map(get).collect::<Vec<_>>(),
        )));
    }
    for (i, name) in names.iter().skip(3).enumerate() {
        fields.push(Field::new(name, DataType::Float64, false));
        columns.push(Arc::new(Float64Array::from(
            rows.iter().map(|r| r.runs[i]).collect::<Vec<_>>(),
        )));
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), columns)
        .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn main() {
    let mut jitter = Jitter::seeded(42);
    let rows = generate_rows(&mut jitter);

    write_csv("sample_data.csv", &rows);
    write_parquet("sample_data.parquet", &rows);

    println!(
        "Wrote {} rows ({RUNS} runs each) to sample_data.csv and sample_data.parquet",
        rows.len()
    );
}
