use std::path::Path;
use stockcast_common::{Direction, PredictionRecord};
use stockcast_deps::{
	chrono::{NaiveDate, Utc},
	log, serde_json,
};
use stockcast_util::{err, error::Result};

/// Write a record for `direction`, stamped with the current time.
pub fn publish(direction: Direction, date: Option<String>, output: &Path) -> Result<PredictionRecord> {
	let now = Utc::now();
	let date = match date {
		Some(date) => {
			NaiveDate::parse_from_str(&date, "%Y-%m-%d")
				.map_err(|_| err!("\"{}\" is not a date in the format YYYY-MM-DD", date))?;
			date
		}
		None => now.format("%Y-%m-%d").to_string(),
	};
	let record = PredictionRecord::new(direction, date, now);
	write_record(&record, output)?;
	log::info!("Prediction for {}: {}", record.date_text(), record.prediction);
	Ok(record)
}

pub fn write_record(record: &PredictionRecord, output: &Path) -> Result<()> {
	if let Some(parent) = output.parent() {
		if !parent.as_os_str().is_empty() {
			std::fs::create_dir_all(parent)?;
		}
	}
	let json = serde_json::to_string(record)?;
	std::fs::write(output, json)?;
	Ok(())
}

#[test]
fn test_publish() {
	let dir = std::env::temp_dir().join(format!("stockcast-publish-{}", std::process::id()));
	let output = dir.join("docs").join("prediction.json");
	let record = publish(Direction::Up, Some("2024-01-01".to_owned()), &output).unwrap();
	let written = std::fs::read_to_string(&output).unwrap();
	let read = PredictionRecord::from_json(&written).unwrap();
	assert_eq!(read, record);
	assert_eq!(read.prediction, "Up");
	assert_eq!(read.date_text(), "2024-01-01");
	match read.updated_at() {
		stockcast_common::UpdatedAt::Text(updated_at) => assert!(updated_at.ends_with('Z')),
		updated_at => panic!("unexpected updated_at {:?}", updated_at),
	}
	assert!(stockcast_common::parse_updated_at(read.updated_at(), &Utc).is_some());
	assert!(publish(Direction::Down, Some("01/02/2024".to_owned()), &output).is_err());
	std::fs::remove_dir_all(&dir).unwrap();
}
