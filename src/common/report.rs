use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::detector::{DetectionStatus, SuspicionVerdict};
use crate::processing::channel::Channel;

/// Verdict for one image file, with where it came from.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub image: String,
    pub channel: Channel,
    pub width: u32,
    pub height: u32,
    pub verdict: SuspicionVerdict,
}

#[derive(Debug, Default, Serialize)]
pub struct ScanSummary {
    pub total_images: usize,
    pub detected: usize,
    pub suspicious: usize,
    pub normal: usize,
    pub failed: usize,

    pub score_min: f64,
    pub score_max: f64,
    pub score_avg: f64,

    // Load failures, keyed by path
    pub failures: BTreeMap<String, String>,
}

/// Collects per-image reports during a directory scan.
#[derive(Debug, Default)]
pub struct ScanReport {
    reports: Vec<AnalysisReport>,
    failures: BTreeMap<String, String>,
}

impl ScanReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, report: AnalysisReport) {
        self.reports.push(report);
    }

    pub fn record_failure(&mut self, image: String, reason: String) {
        self.failures.insert(image, reason);
    }

    pub fn reports(&self) -> &[AnalysisReport] {
        &self.reports
    }

    pub fn summarize(&self) -> ScanSummary {
        let mut summary = ScanSummary {
            total_images: self.reports.len() + self.failures.len(),
            failed: self.failures.len(),
            failures: self.failures.clone(),
            ..ScanSummary::default()
        };

        for report in &self.reports {
            match report.verdict.status {
                DetectionStatus::SteganographyDetected => summary.detected += 1,
                DetectionStatus::Suspicious => summary.suspicious += 1,
                DetectionStatus::Normal => summary.normal += 1,
            }
        }

        if !self.reports.is_empty() {
            let scores = self.reports.iter().map(|r| r.verdict.score);
            summary.score_min = scores.clone().fold(f64::INFINITY, f64::min);
            summary.score_max = scores.clone().fold(f64::NEG_INFINITY, f64::max);
            summary.score_avg = scores.sum::<f64>() / self.reports.len() as f64;
        }

        summary
    }

    pub fn export_to_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let output = serde_json::json!({
            "summary": self.summarize(),
            "images": self.reports,
        });
        write_json(path, &output)
    }
}

impl AnalysisReport {
    pub fn export_to_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        write_json(path, self)
    }
}

fn write_json<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> std::io::Result<()> {
    let json_string = serde_json::to_string_pretty(value)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::LsbDetector;
    use crate::processing::channel::PixelChannel;
    use crate::processing::steganography;

    fn report(name: &str, channel: &PixelChannel) -> AnalysisReport {
        AnalysisReport {
            image: name.to_string(),
            channel: Channel::Red,
            width: channel.width(),
            height: channel.height(),
            verdict: LsbDetector::new().analyze(channel),
        }
    }

    #[test]
    fn test_scan_summary() {
        let flat = PixelChannel::filled(32, 32, 90).unwrap();
        let stego = steganography::embed_message(&flat, "secret").unwrap();

        let mut scan = ScanReport::new();
        scan.record(report("stego.png", &stego));
        scan.record(report("flat.png", &flat));
        scan.record_failure("broken.jpg".to_string(), "corrupt".to_string());

        let summary = scan.summarize();
        assert_eq!(summary.total_images, 3);
        assert_eq!(summary.detected, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.detected + summary.suspicious + summary.normal, 2);
        assert!(summary.score_min <= summary.score_avg);
        assert!(summary.score_avg <= summary.score_max);
        assert_eq!(summary.failures.get("broken.jpg").map(String::as_str), Some("corrupt"));
    }

    #[test]
    fn test_export_writes_verdict_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let channel = PixelChannel::filled(16, 16, 100).unwrap();
        report("gray.png", &channel).export_to_json(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["image"], "gray.png");
        assert_eq!(value["channel"], "red");
        assert!(value["verdict"]["message"].is_null());
        assert_eq!(value["verdict"]["lsb_plane"]["mean"], 0.0);
        assert_eq!(value["verdict"]["indicators"].as_array().unwrap().len(), 4);
    }
}
