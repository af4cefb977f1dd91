//! Main application for the Gomoku GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};

use super::board_view::BoardView;
use super::game_state::{pos_label, FirstMove, GameOutcome, GameState, MAX_UI_DEPTH};
use super::theme::*;
use crate::Stone;

fn stone_name(stone: Stone) -> &'static str {
    match stone {
        Stone::Black => "BLACK",
        Stone::White => "WHITE",
    }
}

/// Main Gomoku application
pub struct GomokuApp {
    state: GameState,
    board_view: BoardView,
    show_debug: bool,
}

impl Default for GomokuApp {
    fn default() -> Self {
        Self {
            state: GameState::new(FirstMove::default()),
            board_view: BoardView::default(),
            show_debug: true,
        }
    }
}

impl GomokuApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::default()
    }

    /// New game keeping the configured depth
    fn new_game(&mut self, first_move: FirstMove) {
        if self.state.is_engine_thinking() {
            // The worker finishes on its own; its answer is dropped with the receiver
            tracing::debug!("discarding engine search in progress");
        }
        self.state.first_move = first_move;
        self.state.reset();
    }

    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    if ui.button("New Game (you move first)").clicked() {
                        self.new_game(FirstMove::Human);
                        ui.close_menu();
                    }
                    if ui.button("New Game (engine moves first)").clicked() {
                        self.new_game(FirstMove::Engine);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Undo").clicked() {
                        self.state.undo();
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Engine Panel (D)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("You: {}", stone_name(self.state.human_color())));
                });
            });
        });
    }

    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(SIDE_PANEL_BG))
            .show(ctx, |ui| {
                ui.add_space(12.0);
                ui.label(RichText::new("GOMOKU").size(22.0).strong().color(TEXT_PRIMARY));
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                self.render_timer_card(ui);
                ui.add_space(10.0);

                self.render_settings_card(ui);
                ui.add_space(10.0);

                self.render_actions_card(ui);

                if self.show_debug {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                if let Some(outcome) = self.state.outcome.clone() {
                    ui.add_space(10.0);
                    self.render_game_over_card(ui, &outcome);
                }

                if let Some(msg) = &self.state.message {
                    ui.add_space(10.0);
                    Self::render_message_card(ui, msg);
                }
            });
    }

    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let turn = self.state.current_turn;
            let (fill, ink) = match turn {
                Stone::Black => (BLACK_STONE, TEXT_PRIMARY),
                Stone::White => (WHITE_STONE, BLACK_STONE),
            };

            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 22.0, fill);
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    if turn == self.state.human_color() { "You" } else { "AI" },
                    egui::FontId::proportional(14.0),
                    ink,
                );
                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(RichText::new(stone_name(turn)).size(18.0).strong().color(TEXT_PRIMARY));

                    let (status, color) = if self.state.is_engine_thinking() {
                        ("Engine thinking...", TIMER_WARNING)
                    } else if self.state.outcome.is_some() {
                        ("Game Over", WIN_HIGHLIGHT)
                    } else {
                        ("Your turn", TIMER_NORMAL)
                    };
                    ui.label(RichText::new(status).size(12.0).color(color));
                });
            });
        });
    }

    fn render_timer_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("TIMER").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            if let Some(elapsed) = self.state.engine_thinking_elapsed() {
                let secs = elapsed.as_secs_f32();
                let color = if secs < 1.0 {
                    TIMER_NORMAL
                } else if secs < 3.0 {
                    TIMER_WARNING
                } else {
                    TIMER_CRITICAL
                };
                ui.label(RichText::new(format!("{secs:.2}s")).size(28.0).strong().color(color));
            } else {
                let elapsed = self.state.move_timer.elapsed();
                ui.label(
                    RichText::new(format!("{:.1}s", elapsed.as_secs_f32()))
                        .size(24.0)
                        .color(TEXT_PRIMARY),
                );
            }

            if let Some(engine_time) = self.state.move_timer.engine_time {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Last engine move: {:.3}s", engine_time.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
        });
    }

    fn render_settings_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ENGINE").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            let mut depth = self.state.engine_depth();
            ui.add(egui::Slider::new(&mut depth, 1..=MAX_UI_DEPTH).text("depth"));
            if depth != self.state.engine_depth() {
                self.state.set_engine_depth(depth);
            }
            ui.label(
                RichText::new("Applies from the next engine move")
                    .size(10.0)
                    .color(TEXT_SECONDARY),
            );
        });
    }

    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            let button = |ui: &mut egui::Ui, text: &str| {
                Frame::new()
                    .fill(BUTTON_BG)
                    .corner_radius(CornerRadius::same(6))
                    .inner_margin(8.0)
                    .show(ui, |ui| {
                        ui.add(
                            egui::Label::new(RichText::new(text).size(12.0).color(TEXT_PRIMARY))
                                .sense(egui::Sense::click()),
                        )
                        .clicked()
                    })
                    .inner
            };

            ui.horizontal(|ui| {
                if button(ui, "Undo") {
                    self.state.undo();
                }
                ui.add_space(4.0);
                if button(ui, "New Game") {
                    self.new_game(self.state.first_move);
                }
            });

            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("Move #{}", self.state.move_history.len()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
        });
    }

    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("LAST SEARCH").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            let Some(result) = &self.state.last_engine_result else {
                ui.label(RichText::new("Waiting for engine...").size(10.0).color(TEXT_MUTED));
                return;
            };

            ui.label(RichText::new(format!("Score: {}", result.score)).size(11.0).color(TEXT_SECONDARY));
            ui.label(
                RichText::new(format!(
                    "{} nodes, {} cutoffs, {}ms",
                    result.nodes, result.cutoffs, result.time_ms
                ))
                .size(10.0)
                .color(TEXT_MUTED),
            );
            if result.aborted {
                ui.label(RichText::new("Stopped by time limit").size(10.0).color(TIMER_WARNING));
            }
            if let Some(pos) = result.best_move {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("-> {}", pos_label(pos)))
                        .size(12.0)
                        .strong()
                        .color(WIN_HIGHLIGHT),
                );
            }
        });
    }

    fn render_game_over_card(&mut self, ui: &mut egui::Ui, outcome: &GameOutcome) {
        let (headline, detail) = match outcome {
            GameOutcome::Win { winner, .. } if *winner == self.state.human_color() => {
                (format!("{} WINS", stone_name(*winner)), "Congratulations, you won!")
            }
            GameOutcome::Win { winner, .. } => {
                (format!("{} WINS", stone_name(*winner)), "The engine won this one.")
            }
            GameOutcome::Draw => ("DRAW".to_string(), "The board is full."),
        };

        Frame::new()
            .fill(GAME_OVER_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("GAME OVER").size(12.0).color(WIN_HIGHLIGHT));
                    ui.add_space(8.0);
                    ui.label(RichText::new(headline).size(18.0).strong().color(TEXT_PRIMARY));
                    ui.label(RichText::new(detail).size(11.0).color(TEXT_SECONDARY));
                    ui.add_space(12.0);

                    if ui.button("New Game").clicked() {
                        self.new_game(self.state.first_move);
                    }
                });
            });
    }

    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(MESSAGE_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
            });
    }

    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            let accept_input = self.state.is_human_turn() && !self.state.is_engine_thinking();
            let clicked = self.board_view.show(
                ui,
                &self.state.board,
                self.state.current_turn,
                self.state.winning_line(),
                accept_input,
            );

            if let Some(pos) = clicked {
                if let Err(msg) = self.state.try_place_stone(pos) {
                    self.state.message = Some(msg);
                }
            }
        });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        let (debug, undo, new_game) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::D),
                i.key_pressed(egui::Key::U),
                i.key_pressed(egui::Key::N),
            )
        });

        if debug {
            self.show_debug = !self.show_debug;
        }
        if undo {
            self.state.undo();
        }
        if new_game {
            self.new_game(self.state.first_move);
        }
    }
}

impl eframe::App for GomokuApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);
        self.state.check_engine_result();

        if self.state.is_engine_turn() && !self.state.is_engine_thinking() {
            self.state.start_engine_thinking();
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        // Keep polling the worker and ticking the timer
        if self.state.is_engine_thinking() || self.state.outcome.is_none() {
            ctx.request_repaint();
        }
    }
}
