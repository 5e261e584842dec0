//! Synthesis response parsing.
//!
//! The synthesizer is instructed to end its answer with a self-reported
//! confidence figure. Extracting it is pure domain logic, no I/O, just
//! text pattern matching over a few tolerated formats.

/// Parse a self-reported confidence figure from a synthesis response.
///
/// # Supported Formats
///
/// 1. **JSON**: `{"confidence": 0.8}` anywhere in the text
/// 2. **Labelled fraction in [0, 1]**: `Confidence: 0.85`
/// 3. **Labelled percentage**: `Confidence: 85%`
///
/// Returns `None` when no confidence can be extracted; callers fall back
/// to lexical agreement scoring in that case.
pub fn parse_confidence(response: &str) -> Option<f32> {
    // JSON payloads embedded in the response
    if let Some(start) = response.find('{') {
        if let Some(end) = response[start..].rfind('}') {
            let json_str = &response[start..start + end + 1];
            if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(json_str) {
                if let Some(value) = parsed.get("confidence").and_then(|v| v.as_f64()) {
                    return Some(normalize(value as f32));
                }
            }
        }
    }

    // Labelled figure: "Confidence: 0.85" or "confidence: 85%"
    let lower = response.to_lowercase();
    let idx = lower.rfind("confidence")?;
    let tail = &lower[idx..];
    let number: String = tail
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if number.is_empty() {
        return None;
    }
    let value: f32 = number.parse().ok()?;
    Some(normalize(value))
}

/// Map percentages and stray values into [0, 1]
fn normalize(value: f32) -> f32 {
    if value > 1.0 {
        (value / 100.0).clamp(0.0, 1.0)
    } else {
        value.clamp(0.0, 1.0)
    }
}
