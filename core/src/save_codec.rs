//! Save codec: persisted blob <-> live state, with forward migration.
//!
//! RULES:
//!   - Malformed input never errors. It is logged and treated as "no
//!     save"; the player starts fresh instead of being locked out.
//!   - A save from a NEWER build is the one hard error
//!     (`UnknownSaveVersion`): silently replacing it would lose progress
//!     across a downgrade.
//!   - Migrations operate on raw JSON, one pure step per version, applied
//!     in order. A step only touches the fields it knows about; every
//!     other sibling is carried forward untouched.
//!
//! Save format changelog:
//!   v0: bare state object, balances as decimal dollars (`currency`,
//!       `enjoyment`), no envelope.
//!   v1: envelope `{version, savedAt, state}`; `ownedItems`, upgrade id
//!       list, nested `nostalgia {points, resets, enjoymentEarnedCents}`.
//!   v2: `lastSimulatedAtMs`; `items`, upgrade level map, flattened
//!       nostalgia fields, workshop/maison/catalog/crafting layers.

use crate::{
    error::{IdleError, IdleResult},
    snapshot::{ms_to_datetime, SaveEnvelope, CURRENT_SAVE_VERSION},
    state::GameState,
    types::EpochMs,
};
use chrono::DateTime;
use serde_json::{json, Map, Value};

/// Where a loaded state came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOrigin {
    /// Nothing was stored.
    Empty,
    /// Something was stored but could not be read; started fresh.
    Malformed { reason: String },
    /// Decoded successfully, possibly after migration.
    Restored { from_version: u64 },
}

#[derive(Debug, Clone)]
pub struct LoadedSave {
    pub envelope: SaveEnvelope,
    pub origin: LoadOrigin,
}

impl LoadedSave {
    fn fresh(now: EpochMs, origin: LoadOrigin) -> Self {
        Self { envelope: SaveEnvelope::wrap(&GameState::fresh(now), now), origin }
    }

    pub fn into_state(self) -> GameState {
        self.envelope.into_state()
    }
}

type MigrationStep = fn(Value) -> Result<Value, String>;

/// MIGRATIONS[v] upgrades a version-v document to version v+1.
/// NEVER edit a published step. Append a new one.
const MIGRATIONS: [MigrationStep; CURRENT_SAVE_VERSION as usize] = [migrate_v0_to_v1, migrate_v1_to_v2];

/// Decode a persisted blob. `now` seeds the fresh state used when there
/// is nothing usable to restore.
pub fn load(raw: Option<&str>, now: EpochMs) -> IdleResult<LoadedSave> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(LoadedSave::fresh(now, LoadOrigin::Empty)),
        Some(r) => r,
    };

    match decode(raw) {
        Ok((envelope, from_version)) => {
            if from_version < CURRENT_SAVE_VERSION {
                log::info!("save migrated from v{from_version} to v{CURRENT_SAVE_VERSION}");
            }
            Ok(LoadedSave { envelope, origin: LoadOrigin::Restored { from_version } })
        }
        Err(IdleError::MalformedSave { reason }) => {
            log::warn!("discarding malformed save, starting fresh: {reason}");
            Ok(LoadedSave::fresh(now, LoadOrigin::Malformed { reason }))
        }
        Err(e) => Err(e),
    }
}

fn malformed(reason: impl Into<String>) -> IdleError {
    IdleError::MalformedSave { reason: reason.into() }
}

/// Parse, migrate and decode. Returns the envelope and the version the
/// blob was written at.
pub fn decode(raw: &str) -> IdleResult<(SaveEnvelope, u64)> {
    let mut doc: Value = serde_json::from_str(raw).map_err(|e| malformed(e.to_string()))?;
    let obj = doc.as_object().ok_or_else(|| malformed("save is not a JSON object"))?;

    let from_version = match obj.get("version") {
        None => 0,
        Some(v) => v.as_u64().ok_or_else(|| malformed(format!("bad version field: {v}")))?,
    };
    if from_version > CURRENT_SAVE_VERSION {
        return Err(IdleError::UnknownSaveVersion {
            found: from_version,
            supported: CURRENT_SAVE_VERSION,
        });
    }

    for step in &MIGRATIONS[from_version as usize..] {
        doc = step(doc).map_err(malformed)?;
    }
    fill_envelope_times(&mut doc).map_err(malformed)?;

    let envelope: SaveEnvelope =
        serde_json::from_value(doc).map_err(|e| malformed(e.to_string()))?;
    Ok((envelope, from_version))
}

/// Encode the canonical current-version blob for `state`.
pub fn save(state: &GameState, now: EpochMs) -> IdleResult<String> {
    Ok(serde_json::to_string(&SaveEnvelope::wrap(state, now))?)
}

// ── Migration steps ───────────────────────────────────────────────

fn dollars_to_cents(v: &Value) -> Result<u64, String> {
    let dollars = v.as_f64().ok_or_else(|| format!("expected a number of dollars, got {v}"))?;
    if !dollars.is_finite() {
        return Err(format!("non-finite balance {dollars}"));
    }
    Ok((dollars * 100.0).round().max(0.0) as u64)
}

fn take_object(doc: Value, what: &str) -> Result<Map<String, Value>, String> {
    match doc {
        Value::Object(map) => Ok(map),
        other => Err(format!("{what} is not an object: {other}")),
    }
}

fn parse_saved_at(v: &Value) -> Result<EpochMs, String> {
    let raw = v.as_str().ok_or_else(|| format!("savedAt is not a string: {v}"))?;
    let ms = DateTime::parse_from_rfc3339(raw)
        .map_err(|e| format!("savedAt {raw:?}: {e}"))?
        .timestamp_millis();
    Ok(ms.max(0) as u64)
}

/// Fill envelope timestamps a current-version blob left out, each from
/// the other when it is present. Neither present leaves the serde
/// default (epoch 0).
fn fill_envelope_times(doc: &mut Value) -> Result<(), String> {
    let Some(env) = doc.as_object_mut() else {
        return Ok(());
    };
    match (env.contains_key("savedAt"), env.contains_key("lastSimulatedAtMs")) {
        (true, false) => {
            let ms = parse_saved_at(&env["savedAt"])?;
            env.insert("lastSimulatedAtMs".into(), json!(ms));
        }
        (false, true) => {
            if let Some(ms) = env["lastSimulatedAtMs"].as_u64() {
                env.insert("savedAt".into(), json!(ms_to_datetime(ms).to_rfc3339()));
            }
        }
        _ => {}
    }
    Ok(())
}

/// v0 -> v1: wrap the bare state in an envelope, dollars -> cents.
fn migrate_v0_to_v1(doc: Value) -> Result<Value, String> {
    let mut state = take_object(doc, "v0 save")?;

    if let Some(v) = state.remove("currency") {
        state.insert("currencyCents".into(), json!(dollars_to_cents(&v)?));
    }
    if let Some(v) = state.remove("enjoyment") {
        state.insert("enjoymentCents".into(), json!(dollars_to_cents(&v)?));
    }
    let saved_at = state
        .remove("savedAt")
        .unwrap_or_else(|| json!(ms_to_datetime(0).to_rfc3339()));

    Ok(json!({
        "version": 1,
        "savedAt": saved_at,
        "state": Value::Object(state),
    }))
}

/// v1 -> v2: add `lastSimulatedAtMs`, rename/reshape vault fields,
/// flatten nostalgia, seed the catalog stream.
fn migrate_v1_to_v2(doc: Value) -> Result<Value, String> {
    let mut env = take_object(doc, "v1 envelope")?;

    let saved_at_ms = match env.get("savedAt") {
        Some(v) => parse_saved_at(v)?,
        None => env.get("lastSimulatedAtMs").and_then(Value::as_u64).unwrap_or(0),
    };
    env.entry("savedAt").or_insert(json!(ms_to_datetime(saved_at_ms).to_rfc3339()));
    env.entry("lastSimulatedAtMs").or_insert(json!(saved_at_ms));

    let mut state = take_object(env.remove("state").unwrap_or_else(|| json!({})), "v1 state")?;

    if let Some(owned) = state.remove("ownedItems") {
        state.entry("items").or_insert(owned);
    }

    if let Some(Value::Array(ids)) = state.get("upgrades").cloned() {
        let levels: Map<String, Value> = ids
            .iter()
            .filter_map(Value::as_str)
            .map(|id| (id.to_string(), json!(1)))
            .collect();
        state.insert("upgrades".into(), Value::Object(levels));
    }

    if let Some(nostalgia) = state.remove("nostalgia") {
        let nostalgia = take_object(nostalgia, "v1 nostalgia")?;
        for (old, new) in [
            ("points", "nostalgiaPoints"),
            ("resets", "nostalgiaResets"),
            ("enjoymentEarnedCents", "nostalgiaEnjoymentEarnedCents"),
            ("lastGain", "nostalgiaLastGain"),
        ] {
            if let Some(v) = nostalgia.get(old) {
                state.entry(new).or_insert(v.clone());
            }
        }
    }

    state
        .entry("catalog")
        .or_insert(json!({ "seed": saved_at_ms }));

    env.insert("state".into(), Value::Object(state));
    env.insert("version".into(), json!(2));
    Ok(Value::Object(env))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_cover_every_version() {
        assert_eq!(MIGRATIONS.len() as u64, CURRENT_SAVE_VERSION);
    }

    #[test]
    fn dollars_round_to_nearest_cent() {
        assert_eq!(dollars_to_cents(&json!(12.345)), Ok(1_235));
        assert_eq!(dollars_to_cents(&json!(-3.0)), Ok(0));
        assert!(dollars_to_cents(&json!("12")).is_err());
    }

    #[test]
    fn v1_step_keeps_unknown_siblings() {
        let doc = json!({
            "version": 1,
            "savedAt": "2026-01-01T00:00:00Z",
            "state": { "mysteryField": 7 },
            "extra": "kept"
        });
        let out = migrate_v1_to_v2(doc).unwrap();
        assert_eq!(out["extra"], json!("kept"));
        assert_eq!(out["state"]["mysteryField"], json!(7));
        assert_eq!(out["lastSimulatedAtMs"], json!(1_767_225_600_000u64));
    }

    #[test]
    fn v1_step_without_saved_at_uses_the_cursor() {
        let out = migrate_v1_to_v2(json!({ "version": 1, "lastSimulatedAtMs": 5_000, "state": {} })).unwrap();
        assert_eq!(out["lastSimulatedAtMs"], json!(5_000));
        assert_eq!(out["savedAt"], json!("1970-01-01T00:00:05+00:00"));
        assert_eq!(out["state"]["catalog"]["seed"], json!(5_000));
    }
}
