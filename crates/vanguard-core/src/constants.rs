//! Tuning parameters for the combat-decision core.

// --- Global engagement control ---

/// Army-wide win probability above which the controller commits to a push.
pub const PUSH_COMMIT_PROB: f64 = 0.7;

/// Win probability below which a committed push is abandoned.
/// Together with `PUSH_COMMIT_PROB` this forms the hysteresis band
/// (0.3, 0.7) in which the attack flag never changes.
pub const PUSH_ABANDON_PROB: f64 = 0.3;

// --- Rally point ---

/// Expansions closer than this to the home base are not rally candidates.
pub const RALLY_MIN_EXPANSION_DISTANCE: f64 = 5.0;

/// How far the rally point is shifted from the chosen expansion toward the
/// map center. Keeps the army forward of the mineral line.
pub const RALLY_FORWARD_OFFSET: f64 = 5.0;

// --- Threat detection ---

/// Radius around the nearest enemy within which enemies form one squad.
/// A single-pass radius query; separate pockets are not merged.
pub const SQUAD_CLUSTER_RADIUS: f64 = 10.0;

/// A squad must come within this distance of an owned structure before the
/// allocator is engaged; roaming squads farther out are ignored.
pub const DEFENSE_PERIMETER_RADIUS: f64 = 10.0;

// --- Force allocation ---

/// Strict threshold a counter-force must exceed against its squad to be
/// considered sufficient (and cacheable).
pub const COUNTER_SUFFICIENT_PROB: f64 = 0.7;

// --- Siege tank stance ---

/// Enemies inside this range force the mobile stance (sieged guns cannot
/// depress onto point-blank targets).
pub const SIEGE_MIN_RANGE: f64 = 4.0;

/// Enemies inside this range (and outside `SIEGE_MIN_RANGE`) trigger siege
/// deployment.
pub const SIEGE_DEPLOY_RANGE: f64 = 14.0;

/// While sieged, any enemy inside this range gets an attack order every
/// tick — a sieged tank cannot reposition, so it must always hold a target.
pub const SIEGE_FIRE_RANGE: f64 = 15.0;

// --- Valkyrie stance ---

/// Scan radius for the air-intercept / ground-support decision.
pub const VALKYRIE_ENGAGE_RANGE: f64 = 20.0;
