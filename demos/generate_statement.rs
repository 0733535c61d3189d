use std::env;
use std::fs::{create_dir_all, File};
use std::io::{self, stdout, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Duration, FixedOffset, TimeZone};
use rand::{Rng, RngExt};
use rust_decimal::Decimal;
use serde_json::json;

const PROBABILITY_DEBIT: f64 = 0.60;
const PROBABILITY_CREDIT: f64 = 0.30;
const PROBABILITY_UNKNOWN_TYPE: f64 = 0.05;

const DEBIT_MODES: [&str; 5] = ["UPI", "NEFT", "ATM", "CARD", "OTHERS"];
const CREDIT_MODES: [&str; 3] = ["NEFT", "IMPS", "OTHERS"];

struct GeneratorConfig {
    num_records: usize,
    output_path: String
}

impl GeneratorConfig {
    fn from_args() -> Self {
        let args: Vec<String> = env::args().collect();
        let num_records = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);
        let output_path = args.get(2).cloned().unwrap_or_else(|| "samples/stress_statement.json".to_string());

        Self {
            num_records,
            output_path
        }
    }
}

fn main() -> io::Result<()> {
    let config = GeneratorConfig::from_args();

    println!(
        "Generating a statement with {} records in {}...",
        config.num_records, config.output_path
    );

    if let Some(parent) = Path::new(&config.output_path).parent() {
        create_dir_all(parent)?;
    }

    let file = File::create(&config.output_path)?;
    let mut writer = BufWriter::new(file);

    write!(writer, "{{\"Account\":{{\"Transactions\":{{\"Transaction\":[")?;

    let mut rng = rand::rng();
    let offset = FixedOffset::east_opt(19_800).expect("IST offset is in range");
    let mut instant = offset.with_ymd_and_hms(2023, 1, 1, 8, 0, 0).unwrap();
    let mut balance = Decimal::from(100_000);

    for record_number in 1..=config.num_records {
        if record_number > 1 {
            write!(writer, ",")?;
        }

        instant += Duration::minutes(rng.random_range(5..720));

        let roll: f64 = rng.random();

        let record = if roll < PROBABILITY_DEBIT {
            generate_debit(&mut rng, instant, &mut balance)
        } else if roll < PROBABILITY_DEBIT + PROBABILITY_CREDIT {
            generate_credit(&mut rng, instant, &mut balance)
        } else if roll < PROBABILITY_DEBIT + PROBABILITY_CREDIT + PROBABILITY_UNKNOWN_TYPE {
            generate_unknown_type(&mut rng, instant, balance)
        } else {
            generate_invalid_record(&mut rng, instant, balance)
        };

        write!(writer, "{record}")?;

        if record_number % 100_000 == 0 {
            print!(".");
            stdout().flush()?;
        }
    }

    write!(writer, "]}}}}}}")?;
    writer.flush()?;

    println!("\nGeneration complete.");

    Ok(())
}

fn random_amount<R: Rng>(rng: &mut R, max_units: i64) -> Decimal {
    Decimal::new(rng.random_range(100..max_units * 100), 2)
}

fn record_json(amount: &str, kind: &str, mode: &str, instant: DateTime<FixedOffset>, balance: &str) -> String {
    json!({
        "amount": amount,
        "type": kind,
        "mode": mode,
        "transactionTimestamp": instant.to_rfc3339(),
        "currentBalance": balance,
        "valueDate": instant.to_rfc3339()
    })
    .to_string()
}

fn generate_debit<R: Rng>(rng: &mut R, instant: DateTime<FixedOffset>, balance: &mut Decimal) -> String {
    let amount = random_amount(rng, 5_000);
    *balance -= amount;

    let mode = DEBIT_MODES[rng.random_range(0..DEBIT_MODES.len())];

    record_json(&amount.to_string(), "DEBIT", mode, instant, &balance.to_string())
}

fn generate_credit<R: Rng>(rng: &mut R, instant: DateTime<FixedOffset>, balance: &mut Decimal) -> String {
    let amount = random_amount(rng, 20_000);
    *balance += amount;

    let mode = CREDIT_MODES[rng.random_range(0..CREDIT_MODES.len())];

    record_json(&amount.to_string(), "CREDIT", mode, instant, &balance.to_string())
}

fn generate_unknown_type<R: Rng>(rng: &mut R, instant: DateTime<FixedOffset>, balance: Decimal) -> String {
    let amount = random_amount(rng, 1_000);

    record_json(&amount.to_string(), "REVERSAL", "OTHERS", instant, &balance.to_string())
}

fn generate_invalid_record<R: Rng>(rng: &mut R, instant: DateTime<FixedOffset>, balance: Decimal) -> String {
    let timestamp = instant.to_rfc3339();
    let balance = balance.to_string();

    let invalid_records = [
        json!({"type": "DEBIT", "mode": "UPI", "transactionTimestamp": timestamp, "currentBalance": balance}),
        json!({"amount": "garbage", "type": "DEBIT", "mode": "UPI", "transactionTimestamp": timestamp, "currentBalance": balance}),
        json!({"amount": "10.00", "type": "DEBIT", "mode": "UPI", "transactionTimestamp": "yesterday", "currentBalance": balance}),
        json!({"amount": "10.00", "type": "DEBIT", "transactionTimestamp": timestamp, "currentBalance": balance}),
        json!({"amount": "10.00", "type": "DEBIT", "mode": "", "transactionTimestamp": timestamp, "currentBalance": balance}),
        json!({"amount": "10.00", "type": "DEBIT", "mode": "UPI", "transactionTimestamp": timestamp}),
    ];

    invalid_records[rng.random_range(0..invalid_records.len())].to_string()
}
