//! Human-readable rendering of cards and table events for terminal output.

use owo_colors::OwoColorize;

use crate::poker::Card;
use crate::table::TableEvent;

pub fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One line per event. With `color` off the same text comes back plain,
/// for logs and pipes.
pub fn format_event(event: &TableEvent, color: bool) -> String {
    match event {
        TableEvent::State(s) => {
            let board = if s.community.is_empty() {
                "-".to_string()
            } else {
                format_cards(&s.community)
            };
            let to_act = s.to_act.as_deref().unwrap_or("-");
            let line = format!(
                "[{}] pot {} | bet {} | board {} | to act: {}",
                s.phase, s.pot, s.current_highest_bet, board, to_act
            );
            if color {
                line.dimmed().to_string()
            } else {
                line
            }
        }
        TableEvent::PlayerNotice { player, message } => {
            let line = format!("note to {}: {}", player, message);
            if color {
                line.yellow().to_string()
            } else {
                line
            }
        }
        TableEvent::AutoAdvance { message } => {
            let line = format!("auto-advance: {}", message);
            if color {
                line.cyan().to_string()
            } else {
                line
            }
        }
        TableEvent::ShowdownResult {
            winners,
            winnings_each,
            pot_remainder,
            hands,
        } => {
            let mut line = format!(
                "showdown: {} win(s) {} chips each",
                winners.join(", "),
                winnings_each
            );
            if *pot_remainder > 0 {
                line.push_str(&format!(" ({} carries over)", pot_remainder));
            }
            for hand in hands {
                line.push_str(&format!(
                    "\n  {}: {} [{}]",
                    hand.player,
                    hand.rank,
                    format_cards(&hand.cards)
                ));
            }
            if color {
                line.green().to_string()
            } else {
                line
            }
        }
        TableEvent::GameEnded { winner } => {
            let line = match winner {
                Some(name) => format!("match over, {} takes the table", name),
                None => "match over".to_string(),
            };
            if color {
                line.bold().green().to_string()
            } else {
                line
            }
        }
    }
}
