use eframe::egui;

use crate::common::ChatMessage;

const OWN_BUBBLE: egui::Color32 = egui::Color32::from_rgb(0x00, 0x7b, 0xff);
const PEER_BUBBLE: egui::Color32 = egui::Color32::from_rgb(0x4c, 0xaf, 0x50);

/// Danh sách bong bóng tin nhắn: tin mình gửi căn phải, tin nhận căn trái.
/// Trong phòng chung, bong bóng nhận dùng màu phòng của người gửi.
pub fn render(ui: &mut egui::Ui, messages: &[ChatMessage], in_room: bool, scroll_to_bottom: bool) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for message in messages {
                let align = if message.send_by_you {
                    egui::Align::Max
                } else {
                    egui::Align::Min
                };

                ui.with_layout(egui::Layout::top_down(align), |ui| {
                    let fill = if message.send_by_you {
                        OWN_BUBBLE
                    } else {
                        message
                            .bg_color
                            .as_deref()
                            .and_then(|color| egui::Color32::from_hex(color).ok())
                            .unwrap_or(PEER_BUBBLE)
                    };
                    let text_color = if message.send_by_you {
                        egui::Color32::WHITE
                    } else {
                        egui::Color32::BLACK
                    };

                    egui::Frame::new()
                        .fill(fill)
                        .corner_radius(egui::CornerRadius::same(5))
                        .inner_margin(egui::Margin::symmetric(10, 6))
                        .show(ui, |ui| {
                            if in_room && !message.send_by_you {
                                ui.label(
                                    egui::RichText::new(format!("{}:", message.from))
                                        .small()
                                        .color(text_color),
                                );
                            }
                            ui.label(egui::RichText::new(&message.message).color(text_color));
                        });
                });
                ui.add_space(6.0);
            }

            if scroll_to_bottom {
                ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
            }
        });
}
