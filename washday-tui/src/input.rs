use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Screen, move_cursor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    None,
    Quit,
    /// Run `service.collection_dates`()
    LoadCollectionDates,
    /// Run `service.delivery_dates`(...) for the chosen collection slot
    LoadDeliveryDates,
    /// Run `service.validate`(...) on the chosen collection and delivery
    ValidateSchedule,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{Backspace, Char, Down, Enter, Esc, Left, Right, Up};

    // Global quit shortcuts
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if key.code == Char('q') && key.modifiers.is_empty() {
        return Action::Quit;
    }

    let mut action = Action::None;

    match app.screen {
        Screen::CollectionDate | Screen::DeliveryDate => match key.code {
            Up | Char('k') | Down | Char('j') => {
                let down = matches!(key.code, Down | Char('j'));
                let (days, index) = app.days_and_index_mut();
                move_cursor(index, days.len(), down);
            }
            Enter | Right | Char(' ') => app.open_day(),
            Char('r') if app.screen == Screen::CollectionDate => {
                action = Action::LoadCollectionDates;
            }
            Left | Esc | Backspace | Char('b') if app.screen == Screen::DeliveryDate => {
                app.go_back();
            }
            _ => {}
        },

        Screen::CollectionSlot | Screen::DeliverySlot => match key.code {
            Up | Char('k') | Down | Char('j') => {
                let down = matches!(key.code, Down | Char('j'));
                let (slots, index) = app.slots_and_index_mut();
                move_cursor(index, slots.len(), down);
            }
            Enter | Right | Char(' ') => {
                if app.choose_slot() {
                    action = if app.screen == Screen::CollectionSlot {
                        Action::LoadDeliveryDates
                    } else {
                        Action::ValidateSchedule
                    };
                }
            }
            Left | Esc | Backspace | Char('b') => app.go_back(),
            _ => {}
        },

        Screen::Summary => match key.code {
            Left | Esc | Backspace | Char('b') => app.go_back(),
            Enter | Char('n') => {
                app.restart();
                action = Action::LoadCollectionDates;
            }
            _ => {}
        },
    }
    action
}
