use super::command::{Command, Service};
use super::send_message::join_recipients;
use crate::domain::{RawPhoneNumber, SenderId, WapAction, WapPush, WapUrl};

pub fn encode_wap_push(request: &WapPush) -> Command {
    let options = request.options();
    let mut command = Command::post("si_push")
        .on(Service::Mms)
        .param(RawPhoneNumber::FIELD, join_recipients(request.recipients()))
        .param(WapUrl::FIELD, request.url().as_str());

    command.push_opt("si_text", options.text.as_deref());
    command.push_opt("si_id", options.si_id.as_deref());
    command.push_opt("si_created", options.created.as_deref());
    command.push_opt("si_expires", options.expires.as_deref());
    command.push_opt("si_action", options.action.map(WapAction::as_str));
    command.push_opt(SenderId::FIELD, options.from.as_ref().map(SenderId::as_str));

    command
}
