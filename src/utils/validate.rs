use once_cell::sync::Lazy;
use regex::Regex;

// Mã sinh viên PTIT, ví dụ "B21DCCN001"
static STUDENT_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][0-9]{2}[A-Z]{4,6}[0-9]{3}$").expect("Invalid student code regex"));

// Học kỳ dạng "2024-2025-HK1"
static SEMESTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{4}-HK[1-3]$").expect("Invalid semester regex"));

// Năm học dạng "2024-2025"
static ACADEMIC_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{4}$").expect("Invalid academic year regex"));

pub fn validate_student_code(student_code: &str) -> Result<(), &'static str> {
    if !STUDENT_CODE_RE.is_match(student_code) {
        return Err("Mã sinh viên không đúng định dạng (ví dụ: B21DCCN001)");
    }
    Ok(())
}

pub fn validate_semester(semester: &str) -> Result<(), &'static str> {
    if !SEMESTER_RE.is_match(semester) {
        return Err("Học kỳ không đúng định dạng (ví dụ: 2024-2025-HK1)");
    }
    // Hai năm trong học kỳ phải liên tiếp
    let first: i32 = semester[0..4].parse().map_err(|_| "Học kỳ không hợp lệ")?;
    let second: i32 = semester[5..9].parse().map_err(|_| "Học kỳ không hợp lệ")?;
    if second != first + 1 {
        return Err("Hai năm trong học kỳ phải liên tiếp (ví dụ: 2024-2025-HK1)");
    }
    Ok(())
}

pub fn validate_academic_year(academic_year: &str) -> Result<(), &'static str> {
    if !ACADEMIC_YEAR_RE.is_match(academic_year) {
        return Err("Năm học không đúng định dạng (ví dụ: 2024-2025)");
    }
    let first: i32 = academic_year[0..4].parse().map_err(|_| "Năm học không hợp lệ")?;
    let second: i32 = academic_year[5..9].parse().map_err(|_| "Năm học không hợp lệ")?;
    if second != first + 1 {
        return Err("Hai năm trong năm học phải liên tiếp (ví dụ: 2024-2025)");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_student_codes() {
        assert!(validate_student_code("B21DCCN001").is_ok());
        assert!(validate_student_code("B20DCAT105").is_ok());
        assert!(validate_student_code("D19DCVT042").is_ok());
    }

    #[test]
    fn test_invalid_student_codes() {
        assert!(validate_student_code("").is_err());
        assert!(validate_student_code("b21dccn001").is_err());
        assert!(validate_student_code("B21DCCN").is_err());
        assert!(validate_student_code("21DCCN001").is_err());
    }

    #[test]
    fn test_valid_semesters() {
        assert!(validate_semester("2024-2025-HK1").is_ok());
        assert!(validate_semester("2023-2024-HK2").is_ok());
        assert!(validate_semester("2024-2025-HK3").is_ok());
    }

    #[test]
    fn test_invalid_semesters() {
        assert!(validate_semester("2024-2025").is_err());
        assert!(validate_semester("2024-2025-HK4").is_err());
        assert!(validate_semester("2024-2026-HK1").is_err());
        assert!(validate_semester("HK1-2024-2025").is_err());
    }

    #[test]
    fn test_valid_academic_years() {
        assert!(validate_academic_year("2024-2025").is_ok());
        assert!(validate_academic_year("1999-2000").is_ok());
    }

    #[test]
    fn test_invalid_academic_years() {
        assert!(validate_academic_year("2024").is_err());
        assert!(validate_academic_year("2024-2024").is_err());
        assert!(validate_academic_year("2025-2024").is_err());
    }
}
