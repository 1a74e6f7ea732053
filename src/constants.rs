// DOM element ids and classes shared by the web front-end.

// Figure and readouts
pub const FIGURE_ID: &str = "figure";
pub const REACTIONS_ID: &str = "reactions";
pub const STAGE_NAME_ID: &str = "stage-name";
pub const STAGE_DESCRIPTION_ID: &str = "stage-description";
pub const PROGRESS_ID: &str = "stage-progress";
pub const STATUS_ID: &str = "status";

// Controls
pub const TRIGGER_BUTTON_ID: &str = "trigger-sequence";
pub const PAIN_BUTTON_ID: &str = "trigger-pain";
pub const DEATH_BUTTON_ID: &str = "trigger-death";
pub const RESPAWN_BUTTON_ID: &str = "respawn";
pub const RESET_BUTTON_ID: &str = "reset-all";
pub const INTENSITY_SLIDER_ID: &str = "intensity";

// Per-entity ids are a prefix followed by the entity name, e.g. `layer-outer`
pub const LAYER_PREFIX: &str = "layer-";
pub const LAYER_BUTTON_PREFIX: &str = "toggle-layer-";
pub const CHANNEL_PREFIX: &str = "channel-";
pub const CHANNEL_BUTTON_PREFIX: &str = "toggle-channel-";
pub const PARTICLES_PREFIX: &str = "particles-";

// State classes toggled on rendered elements
pub const CLASS_HIDDEN: &str = "hidden";
pub const CLASS_REMOVING: &str = "removing";
pub const CLASS_ACTIVE: &str = "active";
pub const CLASS_DEAD: &str = "dead";
pub const CLASS_PRESSED: &str = "pressed";
pub const CLASS_PAIN: &str = "pain";
pub const CLASS_DEATH_CUE: &str = "death-cue";
pub const CLASS_SUBMERGED: &str = "submerged";
