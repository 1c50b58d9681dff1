//! # Display Management
//!
//! Draws a [`GameState`] with macroquad: the overworld grid, a side panel
//! with the roster, the battle overlay and the message log.
//!
//! The display only ever reads the state. Everything it draws is recomputed
//! from the snapshot each frame; the message log is the only thing it keeps.

use crate::input::HELP_LINES;
use crate::rendering::{event_message, HpBand, MessageLog, TileKind};
use crate::{Creature, Direction, GameEvent, GameState, Position, Turn};
use macroquad::prelude::*;

/// Macroquad display manager for the game.
pub struct MacroquadDisplay {
    /// Edge of one map tile in pixels
    pub tile_size: f32,
    /// Width of the side panel in pixels
    pub ui_panel_width: f32,
    /// Height of the message strip in pixels
    pub message_area_height: f32,
    /// Event log shown at the bottom
    pub messages: MessageLog,
    /// Whether the control list is shown in the side panel
    pub show_help: bool,
}

impl MacroquadDisplay {
    /// Creates a display for maps with `tile_size` pixel tiles.
    pub fn new(tile_size: u32) -> Self {
        Self {
            tile_size: tile_size as f32,
            ui_panel_width: 300.0,
            message_area_height: 80.0,
            messages: MessageLog::default(),
            show_help: true,
        }
    }

    /// Window size needed for a map of `width` by `height` tiles.
    pub fn window_size(&self, width: u32, height: u32) -> (f32, f32) {
        (
            width as f32 * self.tile_size + self.ui_panel_width,
            height as f32 * self.tile_size + self.message_area_height,
        )
    }

    /// Adds a message to the log.
    pub fn add_message(&mut self, message: impl Into<String>) {
        self.messages.push(message);
    }

    /// Logs the events that have a message of their own.
    pub fn record_events(&mut self, events: &[GameEvent]) {
        for message in events.iter().filter_map(event_message) {
            self.messages.push(message);
        }
    }

    /// Renders one frame.
    pub fn render_game(&self, state: &GameState) {
        clear_background(BLACK);

        self.render_map(state);
        self.render_player(state);
        self.render_panel(state);
        self.render_messages(state);

        if state.in_battle() {
            self.render_battle(state);
        }
        if state.is_paused {
            self.render_paused();
        }
    }

    fn render_map(&self, state: &GameState) {
        let map = &state.map;
        for y in 0..map.height as i32 {
            for x in 0..map.width as i32 {
                let kind = TileKind::at(map, Position::new(x, y));
                let (px, py) = self.tile_origin(Position::new(x, y));
                draw_rectangle(px, py, self.tile_size, self.tile_size, kind.color());

                if kind == TileKind::TallGrass {
                    // a few blades so zones read as grass without a tileset
                    let blade = self.tile_size / 4.0;
                    for i in 1..4 {
                        let bx = px + i as f32 * blade;
                        draw_line(bx, py + self.tile_size - 2.0, bx - 2.0, py + blade * 2.0, 1.0, DARKGREEN);
                    }
                }
            }
        }
    }

    fn render_player(&self, state: &GameState) {
        let player = &state.player;
        let (px, py) = self.tile_origin(player.position);
        let inset = if player.is_moving { 4.0 } else { 2.0 };
        draw_rectangle(
            px + inset,
            py + inset,
            self.tile_size - inset * 2.0,
            self.tile_size - inset * 2.0,
            RED,
        );

        let center = vec2(px + self.tile_size / 2.0, py + self.tile_size / 2.0);
        let size = self.tile_size / 4.0;
        let (tip, left, right) = match player.direction {
            Direction::Up => (vec2(0.0, -size), vec2(-size, size), vec2(size, size)),
            Direction::Down => (vec2(0.0, size), vec2(-size, -size), vec2(size, -size)),
            Direction::Left => (vec2(-size, 0.0), vec2(size, -size), vec2(size, size)),
            Direction::Right => (vec2(size, 0.0), vec2(-size, -size), vec2(-size, size)),
        };
        draw_triangle(center + tip, center + left, center + right, WHITE);
    }

    fn render_panel(&self, state: &GameState) {
        let panel_x = state.map.width as f32 * self.tile_size + 10.0;
        let line_height = 20.0;
        let mut line_y = 24.0;

        draw_text("TALLGRASS", panel_x, line_y, 24.0, WHITE);
        line_y += line_height * 2.0;

        let pos = state.player.position;
        draw_text(&format!("Position: ({}, {})", pos.x, pos.y), panel_x, line_y, 18.0, WHITE);
        line_y += line_height;
        let stats = &state.statistics;
        draw_text(&format!("Steps: {}", stats.steps_taken), panel_x, line_y, 18.0, WHITE);
        line_y += line_height;
        draw_text(
            &format!("Caught: {}  Won: {}", stats.creatures_caught, stats.battles_won),
            panel_x,
            line_y,
            18.0,
            WHITE,
        );
        line_y += line_height * 2.0;

        draw_text("Party:", panel_x, line_y, 18.0, SKYBLUE);
        line_y += line_height;
        for creature in &state.roster {
            draw_text(
                &format!("{} Lv.{}", creature.name, creature.level),
                panel_x,
                line_y,
                16.0,
                WHITE,
            );
            self.draw_hp_bar(creature, panel_x + 170.0, line_y - 10.0, 100.0);
            line_y += line_height;
        }
        line_y += line_height;

        if self.show_help {
            draw_text("Controls:", panel_x, line_y, 18.0, GREEN);
            line_y += line_height;
            for line in HELP_LINES {
                draw_text(line, panel_x, line_y, 16.0, WHITE);
                line_y += line_height;
            }
        }
    }

    fn render_messages(&self, state: &GameState) {
        let top = state.map.height as f32 * self.tile_size;
        let line_height = 18.0;
        draw_rectangle(
            0.0,
            top,
            screen_width(),
            self.message_area_height,
            Color::new(0.0, 0.0, 0.0, 0.8),
        );

        for (i, message) in self.messages.recent(3).enumerate() {
            draw_text(message, 10.0, top + 22.0 + i as f32 * line_height, 16.0, WHITE);
        }
    }

    fn render_battle(&self, state: &GameState) {
        let battle = &state.battle;
        let (Some(player), Some(wild)) = (&battle.player_creature, &battle.wild_creature) else {
            return;
        };

        let width = state.map.width as f32 * self.tile_size;
        let height = state.map.height as f32 * self.tile_size;
        draw_rectangle(0.0, 0.0, width, height, Color::new(0.0, 0.0, 0.0, 0.8));

        let card_x = width * 0.1;
        let card_w = width * 0.8;
        let card_h = height * 0.8;
        let card_y = height * 0.1;
        draw_rectangle(card_x, card_y, card_w, card_h, WHITE);
        draw_rectangle(card_x, card_y, card_w, card_h * 0.5, Color::from_rgba(187, 247, 208, 255));

        self.draw_combatant(wild, card_x + card_w - 220.0, card_y + 20.0);
        self.draw_combatant(player, card_x + 20.0, card_y + card_h * 0.5 - 80.0);

        let text_y = card_y + card_h * 0.5 + 30.0;
        draw_text(&battle.message, card_x + 20.0, text_y, 20.0, BLACK);

        let mut line_y = text_y + 36.0;
        if battle.turn == Turn::Player && battle.phase.is_undecided() {
            draw_text(&format!("What will {} do?", player.name), card_x + 20.0, line_y, 18.0, BLACK);
            line_y += 24.0;
            for (slot, mv) in player.moves.iter().enumerate() {
                draw_text(
                    &format!("{}: {} ({})", slot + 1, mv.name, mv.power),
                    card_x + 20.0 + (slot % 2) as f32 * 180.0,
                    line_y + (slot / 2) as f32 * 22.0,
                    18.0,
                    DARKBLUE,
                );
            }
            draw_text("C: Catch   R: Run", card_x + card_w - 180.0, line_y, 18.0, MAROON);
        } else if battle.phase.is_undecided() {
            draw_text("Wait for opponent's move...", card_x + 20.0, line_y, 18.0, GRAY);
        }
    }

    fn draw_combatant(&self, creature: &Creature, x: f32, y: f32) {
        draw_rectangle(x, y, 200.0, 60.0, WHITE);
        draw_rectangle_lines(x, y, 200.0, 60.0, 2.0, DARKGRAY);
        draw_text(&format!("{}  Lv.{}", creature.name, creature.level), x + 8.0, y + 20.0, 18.0, BLACK);
        self.draw_hp_bar(creature, x + 8.0, y + 28.0, 120.0);
        draw_text(
            &format!("{}/{} HP", creature.hp, creature.max_hp),
            x + 8.0,
            y + 52.0,
            14.0,
            BLACK,
        );
    }

    fn draw_hp_bar(&self, creature: &Creature, x: f32, y: f32, width: f32) {
        let fraction = creature.hp_fraction();
        draw_rectangle(x, y, width, 8.0, LIGHTGRAY);
        draw_rectangle(x, y, width * fraction, 8.0, HpBand::for_fraction(fraction).color());
    }

    fn render_paused(&self) {
        let text = "PAUSED";
        let dims = measure_text(text, None, 48, 1.0);
        draw_text(
            text,
            (screen_width() - dims.width) / 2.0,
            screen_height() / 2.0,
            48.0,
            YELLOW,
        );
    }

    fn tile_origin(&self, pos: Position) -> (f32, f32) {
        (pos.x as f32 * self.tile_size, pos.y as f32 * self.tile_size)
    }
}
