/// The name of the window where highlights are logged.
///
/// Must be neither a valid channel name nor a valid nickname, as it would then collide with an
/// actual entity.
pub const DEFAULT_WINDOW_NAME: &str = "(Highlights)";

/// The value `tab_new_to_front` is restored to after the highlight window has been opened.
///
/// The host's own default can be found with `/set tab_new_to_front`.
pub const DEFAULT_TAB_NEW_TO_FRONT: u8 = 2;

/// The host setting that controls whether new tabs are brought to the front.
pub const TAB_NEW_TO_FRONT: &str = "tab_new_to_front";

/// The default timestamp format, as a `time` format description.
pub const DEFAULT_TIME_FORMAT: &str = "[hour]:[minute]:[second]";

/// Default left-hand side of the separator for both highlight kinds.
pub const DEFAULT_LEFT: &str = "{channel}";

/// Default right-hand side of the separator for channel message highlights.
pub const DEFAULT_MESSAGE_RIGHT: &str = "\x0321[{time}] <\x02{mode}{nick}\x02> {text}\x0f";

/// Default right-hand side of the separator for channel action highlights.
pub const DEFAULT_ACTION_RIGHT: &str = "\x0321[{time}] * \x02{mode}{nick}\x02 {text}\x0f";

/// The notice printed when the highlight window could not be found after it was opened.
pub const CONTEXT_NOT_FOUND: &str = "Unknown error: Unable to create context object";

/// The name of the config file looked up in the host's configuration directory.
pub const CONFIG_FILE_NAME: &str = "hilight.toml";

/// The prefix of environment variables that override config file values.
pub const ENV_PREFIX: &str = "HILIGHT_";
