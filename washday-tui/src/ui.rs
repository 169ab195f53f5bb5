use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use washday_core::{
    DateSlot, DayPeriod, TimeSlot, format_duration, format_schedule_summary, group_slots_by_period,
};

use crate::app::{App, Screen};

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    let header = Paragraph::new(step_title(app.screen))
        .block(Block::default().borders(Borders::ALL).title("washday"));
    frame.render_widget(header, *header_area);

    // Main screen
    match app.screen {
        Screen::CollectionDate => draw_days(
            frame,
            &app.collection_days,
            app.collection_day_index,
            "Collection day",
            *content_area,
        ),
        Screen::CollectionSlot => draw_slots(
            frame,
            app.collection_day(),
            app.collection_slot_index,
            "Collection slot",
            *content_area,
        ),
        Screen::DeliveryDate => draw_days(
            frame,
            &app.delivery_days,
            app.delivery_day_index,
            "Delivery day",
            *content_area,
        ),
        Screen::DeliverySlot => draw_slots(
            frame,
            app.delivery_day(),
            app.delivery_slot_index,
            "Delivery slot",
            *content_area,
        ),
        Screen::Summary => draw_summary(frame, app, *content_area),
    }

    let nav_hint = match app.screen {
        Screen::CollectionDate => "↑/↓ move · Enter pick day · r reload · q/Ctrl-C quit",
        Screen::DeliveryDate => "↑/↓ move · Enter pick day · Esc/b back · q/Ctrl-C quit",
        Screen::CollectionSlot | Screen::DeliverySlot => {
            "↑/↓ move · Enter pick slot · Esc/b back · q/Ctrl-C quit"
        }
        Screen::Summary => "Enter/n new booking · Esc/b back · q/Ctrl-C quit",
    };

    let status_text = if app.is_loading {
        format!("Loading… · {nav_hint}")
    } else if let Some(msg) = &app.error_message {
        format!("{msg} · {nav_hint}")
    } else {
        nav_hint.to_owned()
    };

    let status_style = if app.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else if app.is_loading {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn step_title(screen: Screen) -> &'static str {
    match screen {
        Screen::CollectionDate => "Step 1 of 4 · When should we collect your laundry?",
        Screen::CollectionSlot => "Step 2 of 4 · Pick a collection window",
        Screen::DeliveryDate => "Step 3 of 4 · When should we bring it back?",
        Screen::DeliverySlot => "Step 4 of 4 · Pick a delivery window",
        Screen::Summary => "Review your booking",
    }
}

fn highlight() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

fn draw_days(frame: &mut Frame<'_>, days: &[DateSlot], selected: usize, title: &str, area: Rect) {
    let items = if days.is_empty() {
        vec![ListItem::new("No days loaded.")]
    } else {
        days.iter()
            .map(|day| {
                let free = day.slots.iter().filter(|slot| slot.is_available()).count();
                let availability = if free == 0 {
                    "fully booked".to_owned()
                } else {
                    format!("{free} of {} slots free", day.slots.len())
                };
                let line = format!(
                    "{:<12} {:<10} {:<7} {availability}",
                    day.label, day.day, day.date
                );
                let style = if free == 0 {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default()
                };
                ListItem::new(line).style(style)
            })
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{title} (↑/↓, Enter)")),
        )
        .highlight_style(highlight())
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !days.is_empty() {
        state.select(Some(selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_slots(
    frame: &mut Frame<'_>,
    day: Option<&DateSlot>,
    selected: usize,
    title: &str,
    area: Rect,
) {
    let Some(day) = day else {
        let paragraph = Paragraph::new("Pick a day first.")
            .block(Block::default().borders(Borders::ALL).title(title.to_owned()));
        frame.render_widget(paragraph, area);
        return;
    };

    let selected_value = day.slots.get(selected).map(TimeSlot::value);
    let groups = group_slots_by_period(&day.slots);

    let mut sections: Vec<(String, Vec<&TimeSlot>)> = groups
        .iter()
        .map(|(period, slots)| (period.to_string(), slots.iter().collect()))
        .collect();
    // Slots at night fall outside every period but are still offered.
    let ungrouped: Vec<&TimeSlot> = day
        .slots
        .iter()
        .filter(|slot| DayPeriod::of_hour(slot.range().start_hour()).is_none())
        .collect();
    if !ungrouped.is_empty() {
        sections.push(("Other".to_owned(), ungrouped));
    }

    let mut items = Vec::new();
    let mut highlighted = None;
    for (heading, slots) in sections {
        let heading_style = Style::default().add_modifier(Modifier::UNDERLINED);
        items.push(ListItem::new(heading).style(heading_style));
        for slot in slots {
            if selected_value.as_deref() == Some(slot.value().as_str()) {
                highlighted = Some(items.len());
            }
            let (suffix, style) = if slot.is_available() {
                ("", Style::default().fg(Color::Green))
            } else {
                ("  (unavailable)", Style::default().fg(Color::DarkGray))
            };
            items.push(ListItem::new(format!("  {}{suffix}", slot.label())).style(style));
        }
    }

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{title} on {} {} (↑/↓, Enter)", day.day, day.date)),
        )
        .highlight_style(highlight())
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(highlighted);
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_summary(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(request) = app.schedule_request() else {
        let paragraph = Paragraph::new("Pick a collection and a delivery slot first.")
            .block(Block::default().borders(Borders::ALL).title("Summary"));
        frame.render_widget(paragraph, area);
        return;
    };

    let turnaround = format_duration(request.delivery_start() - request.collection_start());
    let mut lines: Vec<Line<'_>> = format_schedule_summary(&request)
        .lines()
        .map(|line| Line::from(line.to_owned()))
        .collect();
    lines.push(Line::from(format!("Turnaround: {turnaround}")));
    lines.push(Line::from(""));

    match &app.outcome {
        Some(outcome) if outcome.is_valid => {
            lines.push(Line::styled(
                "Schedule confirmed.",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ));
        }
        Some(outcome) => {
            let message = outcome
                .error
                .clone()
                .unwrap_or_else(|| "Schedule rejected".to_owned());
            lines.push(Line::styled(message, Style::default().fg(Color::Red)));
        }
        None => lines.push(Line::from("Not validated yet.")),
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Summary"))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
