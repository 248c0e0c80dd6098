//! Hypixel game-type database identifiers.
//!
//! The `/status` endpoint reports game types by their internal database
//! name, which for the older games differs from the display name. Useful
//! when writing rule filters in the config file.

pub const QUAKE: &str = "QUAKECRAFT";
pub const WALLS: &str = "WALLS";
pub const PAINTBALL: &str = "PAINTBALL";
pub const SURVIVAL_GAMES: &str = "SURVIVAL_GAMES";
pub const TNT_GAMES: &str = "TNTGAMES";
pub const VAMPIREZ: &str = "VAMPIREZ";
pub const MEGA_WALLS: &str = "WALLS3";
pub const ARCADE: &str = "ARCADE";
pub const ARENA: &str = "ARENA";
pub const UHC: &str = "UHC";
pub const COPS_AND_CRIMS: &str = "MCGO";
pub const WARLORDS: &str = "BATTLEGROUND";
pub const SMASH_HEROES: &str = "SUPER_SMASH";
pub const TURBO_KART_RACERS: &str = "GINGERBREAD";
pub const HOUSING: &str = "HOUSING";
pub const SKYWARS: &str = "SKYWARS";
pub const CRAZY_WALLS: &str = "TRUE_COMBAT";
pub const SPEED_UHC: &str = "SPEED_UHC";
pub const SKYCLASH: &str = "SKYCLASH";
pub const CLASSIC_GAMES: &str = "LEGACY";
pub const PROTOTYPE: &str = "PROTOTYPE";
pub const BEDWARS: &str = "BEDWARS";
pub const MURDER_MYSTERY: &str = "MURDER_MYSTERY";
pub const BUILD_BATTLE: &str = "BUILD_BATTLE";
pub const DUELS: &str = "DUELS";
pub const SKYBLOCK: &str = "SKYBLOCK";
pub const PIT: &str = "PIT";
pub const REPLAY: &str = "REPLAY";
pub const SMP: &str = "SMP";
