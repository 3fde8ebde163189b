/// Inventory rule constants and tunable parameters.
///
/// Layout constants are associated consts so they can size fixed arrays; the
/// remaining fields are player or server options that may differ between
/// sessions but must agree across peers of the same session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Upper bound for a single gold stack.
    pub max_gold: u32,
    /// Per-category auto-equip switches consulted on automatic pick up.
    pub auto_equip: AutoEquipOptions,
    /// Play the inventory sound when an item is equipped automatically.
    pub auto_equip_sound: bool,
    /// Store gold grabbed onto the cursor straight into the backpack.
    pub gold_auto_place_on_grab: bool,
    /// Let the cursor drop gold into belt slots.
    ///
    /// Automatic placement never puts gold on the belt regardless of this flag.
    pub belt_accepts_gold: bool,
    /// Screen geometry used to resolve pointer coordinates to slots.
    pub screen: ScreenLayout,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const GRID_COLUMNS: usize = 10;
    pub const GRID_ROWS: usize = 4;
    pub const GRID_CELLS: usize = Self::GRID_COLUMNS * Self::GRID_ROWS;
    pub const BELT_SLOTS: usize = 8;
    pub const BODY_SLOTS: usize = 7;
    pub const MAX_PLAYERS: usize = 4;
    /// Side length of a single inventory cell in pixels.
    pub const INV_SLOT_SIZE_PX: i32 = 28;

    /// Gold stacks up to this value use the small cursor frame.
    pub const GOLD_SMALL_LIMIT: u32 = 1000;
    /// Gold stacks up to this value use the medium cursor frame.
    pub const GOLD_MEDIUM_LIMIT: u32 = 2500;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_GOLD: u32 = 5000;

    pub fn new() -> Self {
        Self {
            max_gold: Self::DEFAULT_MAX_GOLD,
            auto_equip: AutoEquipOptions::default(),
            auto_equip_sound: false,
            gold_auto_place_on_grab: false,
            belt_accepts_gold: false,
            screen: ScreenLayout::default(),
        }
    }

    pub fn with_max_gold(max_gold: u32) -> Self {
        Self {
            max_gold,
            ..Self::new()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Item categories that automatic pick up may equip directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AutoEquipOptions {
    pub weapons: bool,
    pub armor: bool,
    pub helms: bool,
    pub shields: bool,
    pub jewelry: bool,
}

impl Default for AutoEquipOptions {
    fn default() -> Self {
        Self {
            weapons: true,
            armor: false,
            helms: false,
            shields: false,
            jewelry: false,
        }
    }
}

/// Screen dimensions the inventory panels are laid out against.
///
/// The character panel is anchored to the right edge of the screen and the
/// belt to the bottom centre, so slot rectangles shift with the resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScreenLayout {
    pub width: i32,
    pub height: i32,
}

impl ScreenLayout {
    const PANEL_WIDTH: i32 = 320;
    const MAIN_PANEL_WIDTH: i32 = 640;
    const MAIN_PANEL_HEIGHT: i32 = 128;

    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Left edge of the inventory panel.
    pub const fn right_panel_x(&self) -> i32 {
        self.width - Self::PANEL_WIDTH
    }

    /// Left edge of the control panel hosting the belt.
    pub const fn panel_left(&self) -> i32 {
        (self.width - Self::MAIN_PANEL_WIDTH) / 2
    }

    /// Top edge of the control panel hosting the belt.
    pub const fn panel_top(&self) -> i32 {
        self.height - Self::MAIN_PANEL_HEIGHT
    }
}

impl Default for ScreenLayout {
    fn default() -> Self {
        Self::new(640, 480)
    }
}
