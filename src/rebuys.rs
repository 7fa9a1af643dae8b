use crate::error::Errors;
use std::collections::HashMap;

/// Extra buy-ins per player for one session.
pub type RebuyMap = HashMap<String, u32>;

/// Decodes a `Rebuys` cell such as `"alice: 1, bob:2"`.
///
/// Blank text is an empty map. A segment without a colon, with an empty
/// name, or whose count is not a non-negative integer fails the whole cell.
/// When a name repeats, the last count wins.
pub fn decode(text: &str) -> Result<RebuyMap, Errors> {
    let mut rebuys = RebuyMap::new();
    if text.trim().is_empty() {
        return Ok(rebuys);
    }
    for segment in text.split(',') {
        let (name, count) = segment
            .split_once(':')
            .ok_or_else(|| Errors::MalformedRebuy(segment.trim().to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(Errors::MalformedRebuy(segment.trim().to_string()));
        }
        let count = count
            .trim()
            .parse::<u32>()
            .map_err(|_| Errors::MalformedRebuy(segment.trim().to_string()))?;
        rebuys.insert(name.to_string(), count);
    }
    Ok(rebuys)
}
