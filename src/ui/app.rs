use chrono::Utc;
use eframe::egui;
use tokio::sync::mpsc;

use crate::chat::ChatController;
use crate::common::NetworkEvent;

use super::components::sidebar::SidebarAction;
use super::components::{chat_area, input_bar, login_panel, sidebar};
use super::state::AppState;

pub struct ChatApp {
    state: AppState,
    controller: ChatController,
    event_receiver: mpsc::Receiver<NetworkEvent>,
}

impl ChatApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        controller: ChatController,
        event_receiver: mpsc::Receiver<NetworkEvent>,
        stored_user_name: String,
    ) -> Self {
        Self {
            state: AppState::new(stored_user_name),
            controller,
            event_receiver,
        }
    }

    fn handle_network_events(&mut self) {
        let now = Utc::now();
        while let Ok(event) = self.event_receiver.try_recv() {
            self.controller.handle_event(event, now);
        }
    }

    fn header_text(&self) -> String {
        let session = self.controller.session();
        if let Some(peer) = session.peer() {
            format!("Connected with: {}", peer.user_name)
        } else if session.in_room() {
            let joiners = self.controller.room_joiners();
            if joiners.is_empty() {
                "Joined room chat with random person".to_owned()
            } else {
                format!("Joined room chat with {}", joiners.join(","))
            }
        } else {
            format!(
                "Socket Health: {}",
                if self.controller.is_connected() {
                    "Connected"
                } else {
                    "Disconnected"
                }
            )
        }
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_network_events();
        let now = Utc::now();
        self.controller.tick(now);

        let authenticated = self.controller.session().self_id().is_some();
        let in_room = self.controller.session().in_room();
        let has_peer = self.controller.session().peer().is_some();

        if authenticated {
            egui::SidePanel::left("contacts_sidebar").show(ctx, |ui| {
                if in_room {
                    sidebar::render_room(ui, self.controller.room_joiners());
                } else {
                    let selected = self.controller.session().peer().map(|peer| peer.id.clone());
                    let action = sidebar::render(
                        ui,
                        self.controller.users(),
                        selected.as_deref(),
                        !has_peer,
                    );
                    match action {
                        Some(SidebarAction::SelectUser(peer_id)) => {
                            self.controller.select_peer(&peer_id);
                        }
                        Some(SidebarAction::JoinRoom) => self.controller.join_room(),
                        None => {}
                    }
                }
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(self.header_text());
            ui.separator();

            if let Some(error) = self.controller.error_line() {
                ui.colored_label(egui::Color32::RED, error);
            }

            if !authenticated {
                if login_panel::render(
                    ui,
                    &mut self.state.user_name_input,
                    &mut self.state.password_input,
                ) {
                    self.controller
                        .login(&self.state.user_name_input, &self.state.password_input);
                }
            } else if has_peer || in_room {
                if self.controller.peer_is_typing(now) {
                    if let Some(peer) = self.controller.session().peer() {
                        ui.label(format!("{} is typing...", peer.user_name));
                    }
                }

                let scroll_to_bottom = self.controller.take_new_content();
                chat_area::render(ui, self.controller.conversation(), in_room, scroll_to_bottom);

                ui.separator();
                if let Some(body) = input_bar::render(ui, &mut self.state.draft) {
                    if self.controller.send_message(&body) {
                        self.state.draft.clear();
                    }
                }
                // bắt mọi biên chuyển của ô nhập, kể cả lần dọn sau khi gửi
                self.controller.set_draft(&self.state.draft);
            } else {
                ui.label("Select a user on the left, or join the room");
            }
        });

        ctx.request_repaint();
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.controller.shutdown();
    }
}
