use eframe::egui;

use crate::common::UserEntry;

pub enum SidebarAction {
    SelectUser(String),
    JoinRoom,
}

/// Danh sách liên hệ, kèm nút vào phòng chung khi chưa có hội thoại nào mở.
pub fn render(
    ui: &mut egui::Ui,
    users: &[UserEntry],
    selected: Option<&str>,
    offer_room: bool,
) -> Option<SidebarAction> {
    let mut action = None;

    ui.heading("Users");
    ui.separator();

    if users.is_empty() {
        ui.label("No users yet");
    }
    for user in users {
        let is_selected = selected == Some(user.id.as_str());
        if ui.selectable_label(is_selected, &user.user_name).clicked() && !is_selected {
            action = Some(SidebarAction::SelectUser(user.id.clone()));
        }
    }

    if offer_room {
        ui.separator();
        if ui.button("Join Room").clicked() {
            action = Some(SidebarAction::JoinRoom);
        }
    }

    action
}

/// Roster phòng chung: chỉ hiển thị, không có hành động.
pub fn render_room(ui: &mut egui::Ui, joiners: &[String]) {
    ui.heading("Room");
    ui.separator();

    if joiners.is_empty() {
        ui.label("No one else here yet");
        return;
    }
    for name in joiners {
        ui.horizontal(|ui| {
            ui.colored_label(egui::Color32::GREEN, "●");
            ui.label(name);
        });
    }
}
