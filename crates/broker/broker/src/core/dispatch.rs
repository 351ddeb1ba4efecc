//! Request routing.

use imbroker_proto::{Request, RequestPayload};

use super::ConnectionBroker;

impl ConnectionBroker {
	/// Routes one inbound call to its handler.
	///
	/// Transports call this once per decoded client call, in arrival order.
	pub fn dispatch(&mut self, request: Request) {
		let Request {
			connection,
			payload,
		} = request;
		tracing::trace!(%connection, call = payload.name(), "dispatch");

		match payload {
			RequestPayload::ActivateContext => self.activate_context(connection),
			RequestPayload::Disconnect => self.handle_disconnection(connection),
			RequestPayload::ShowInputMethod => self.show_input_method(connection),
			RequestPayload::HideInputMethod => self.hide_input_method(connection),
			RequestPayload::MouseClickedOnPreedit { pos, rect } => {
				self.mouse_clicked_on_preedit(connection, pos, rect);
			}
			RequestPayload::SetPreedit { text, cursor_pos } => {
				self.set_preedit(connection, &text, cursor_pos);
			}
			RequestPayload::Reset => self.reset(connection),
			RequestPayload::UpdateWidgetInformation {
				state,
				focus_changed,
			} => self.update_widget_information(connection, state, focus_changed),
			RequestPayload::AppOrientationAboutToChange { angle } => {
				self.received_app_orientation_about_to_change(connection, angle);
			}
			RequestPayload::AppOrientationChanged { angle } => {
				self.received_app_orientation_changed(connection, angle);
			}
			RequestPayload::SetCopyPasteState {
				copy_available,
				paste_available,
			} => self.set_copy_paste_state(connection, copy_available, paste_available),
			RequestPayload::ProcessKeyEvent { event } => self.process_key_event(connection, &event),
			RequestPayload::RegisterAttributeExtension { id, resource } => {
				self.register_attribute_extension(connection, id, &resource);
			}
			RequestPayload::UnregisterAttributeExtension { id } => {
				self.unregister_attribute_extension(connection, id);
			}
			RequestPayload::SetExtendedAttribute {
				id,
				target,
				target_name,
				attribute,
				value,
			} => self.set_extended_attribute(
				connection,
				id,
				&target,
				&target_name,
				&attribute,
				&value,
			),
		}
	}
}
