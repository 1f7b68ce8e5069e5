use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
  /// Open the main menu
  Start,
  /// Open the main menu
  Menu,
  /// Leave the current game or text design
  Cancel,
  /// Show the help text
  Help,
}
