//! Minh chứng có cấu trúc cho từng tiêu chí
//!
//! Mỗi chi tiết điểm mang một đoạn minh chứng tự do, kèm theo (tùy chọn) điểm
//! tự chấm cho các tiêu chí con ("1.1", "1.2", ...). Giá trị này được tuần tự
//! hóa bằng đúng một codec tại ranh giới lưu trữ: ghi gì đọc lại được nấy.
//! Điểm tiêu chí con chỉ mang tính tự khai, không được cộng vào điểm chính
//! thức của tiêu chí.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{DrlError, Result};

/// Minh chứng kèm điểm tự chấm tiêu chí con.
///
/// Dùng BTreeMap để thứ tự khóa ổn định khi tuần tự hóa.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/evaluation.ts")]
pub struct EvidenceNote {
    pub evidence: String,
    pub self_scores: BTreeMap<String, f64>,
}

// Dạng JSON lưu trong cột text, tên trường theo hợp đồng với frontend
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EvidenceJson {
    #[serde(default)]
    evidence: String,
    #[serde(default)]
    self_scores: BTreeMap<String, f64>,
}

impl EvidenceNote {
    pub fn new(evidence: impl Into<String>) -> Self {
        Self {
            evidence: evidence.into(),
            self_scores: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.evidence.is_empty() && self.self_scores.is_empty()
    }

    /// Mã hóa để ghi vào cột text.
    ///
    /// Không có điểm tiêu chí con và đoạn minh chứng không thể nhầm với JSON
    /// thì ghi nguyên văn; còn lại ghi JSON. Giá trị rỗng ghi NULL.
    pub fn encode(&self) -> Result<Option<String>> {
        if self.is_empty() {
            return Ok(None);
        }
        if self.self_scores.is_empty() && !self.evidence.trim_start().starts_with('{') {
            return Ok(Some(self.evidence.clone()));
        }
        let json = EvidenceJson {
            evidence: self.evidence.clone(),
            self_scores: self.self_scores.clone(),
        };
        Ok(Some(serde_json::to_string(&json)?))
    }

    /// Giải mã từ cột text.
    ///
    /// Chuỗi bắt đầu bằng '{' phải là JSON hợp lệ theo đúng cấu trúc; chuỗi
    /// khác được coi là minh chứng thuần (dữ liệu cũ).
    pub fn decode(raw: Option<&str>) -> Result<Self> {
        let raw = match raw {
            Some(s) if !s.is_empty() => s,
            _ => return Ok(Self::default()),
        };
        if raw.trim_start().starts_with('{') {
            let json: EvidenceJson = serde_json::from_str(raw).map_err(|e| {
                DrlError::serialization(format!("Minh chứng không đúng cấu trúc: {e}"))
            })?;
            return Ok(Self {
                evidence: json.evidence,
                self_scores: json.self_scores,
            });
        }
        Ok(Self::new(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(note: &EvidenceNote) -> EvidenceNote {
        let encoded = note.encode().unwrap();
        EvidenceNote::decode(encoded.as_deref()).unwrap()
    }

    #[test]
    fn test_plain_text_round_trip() {
        let note = EvidenceNote::new("Giấy chứng nhận tham gia hiến máu 15/10/2024");
        assert_eq!(round_trip(&note), note);
        // Minh chứng thuần được ghi nguyên văn, không bọc JSON
        assert_eq!(
            note.encode().unwrap().unwrap(),
            "Giấy chứng nhận tham gia hiến máu 15/10/2024"
        );
    }

    #[test]
    fn test_sub_scores_round_trip() {
        let mut note = EvidenceNote::new("Bảng điểm học kỳ đính kèm");
        note.self_scores.insert("1.1".to_string(), 3.0);
        note.self_scores.insert("1.2".to_string(), 8.0);
        note.self_scores.insert("1.3".to_string(), 4.0);
        assert_eq!(round_trip(&note), note);
    }

    #[test]
    fn test_empty_note_encodes_to_null() {
        let note = EvidenceNote::default();
        assert_eq!(note.encode().unwrap(), None);
        assert_eq!(EvidenceNote::decode(None).unwrap(), note);
        assert_eq!(EvidenceNote::decode(Some("")).unwrap(), note);
    }

    #[test]
    fn test_evidence_resembling_json_round_trips() {
        // Văn bản bắt đầu bằng '{' phải đi qua đường JSON để đọc lại đúng
        let note = EvidenceNote::new("{ghi chú viết tay của sinh viên}");
        let encoded = note.encode().unwrap().unwrap();
        assert!(encoded.trim_start().starts_with('{'));
        // Không giải mã được coi là dữ liệu hỏng chứ không âm thầm đổi nghĩa
        assert_eq!(round_trip(&note), note);
    }

    #[test]
    fn test_sub_scores_key_order_is_stable() {
        let mut a = EvidenceNote::new("x");
        a.self_scores.insert("1.2".to_string(), 1.0);
        a.self_scores.insert("1.1".to_string(), 2.0);
        let mut b = EvidenceNote::new("x");
        b.self_scores.insert("1.1".to_string(), 2.0);
        b.self_scores.insert("1.2".to_string(), 1.0);
        // Cùng nội dung, khác thứ tự chèn, mã hóa phải giống hệt nhau
        assert_eq!(a.encode().unwrap(), b.encode().unwrap());
    }

    #[test]
    fn test_legacy_plain_text_is_preserved() {
        let decoded = EvidenceNote::decode(Some("Minh chứng cũ dạng chuỗi")).unwrap();
        assert_eq!(decoded.evidence, "Minh chứng cũ dạng chuỗi");
        assert!(decoded.self_scores.is_empty());
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        let err = EvidenceNote::decode(Some("{\"evidence\": ")).unwrap_err();
        assert_eq!(err.code(), "E008");
    }

    #[test]
    fn test_decoded_sub_scores_values() {
        let raw = r#"{"evidence":"Bảng điểm","selfScores":{"1.1":3.0,"1.2":8.5}}"#;
        let note = EvidenceNote::decode(Some(raw)).unwrap();
        assert_eq!(note.evidence, "Bảng điểm");
        assert_eq!(note.self_scores.get("1.1"), Some(&3.0));
        assert_eq!(note.self_scores.get("1.2"), Some(&8.5));
    }
}
