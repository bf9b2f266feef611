//! Score Parser — pulls a single 0–100 integer out of a model reply.
//!
//! Total by construction: any input yields a score, `0` when nothing usable is found.

use serde::Deserialize;
use serde_json::Value;

use crate::llm_client::json::find_json_object;

pub const FALLBACK_SCORE: u8 = 0;
const MAX_SCORE: i64 = 100;

/// Typed view of the `{"score": ...}` object. The value stays raw so that
/// coercion can be decided field by field.
#[derive(Debug, Deserialize)]
struct ScoreEnvelope {
    score: Option<Value>,
}

pub fn parse_score(response_text: &str) -> u8 {
    let Some(candidate) = find_json_object(response_text) else {
        return FALLBACK_SCORE;
    };

    let envelope: ScoreEnvelope = match serde_json::from_str(candidate) {
        Ok(envelope) => envelope,
        Err(_) => return FALLBACK_SCORE,
    };

    envelope
        .score
        .as_ref()
        .and_then(coerce_integer)
        .map(|score| score.clamp(0, MAX_SCORE) as u8)
        .unwrap_or(FALLBACK_SCORE)
}

/// Integers pass through, finite floats round, numeric strings are parsed.
fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.round() as i64)
            })
        }
        _ => None,
    }
}
