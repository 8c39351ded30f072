use crate::{Email, MailerError};
use lettre::Message;
use lettre::message::SinglePart;

/// Converts an [`Email`] into a lettre [`Message`], shared by every transport.
pub(crate) fn build_message(email: Email) -> Result<Message, MailerError> {
    email.validate()?;

    let mut message_builder = Message::builder()
        .from(email.from.parse()?)
        .subject(email.subject);

    for to in email.to {
        message_builder = message_builder.to(to.parse()?);
    }

    let text = email
        .text_body
        .ok_or_else(|| MailerError::Builder("No email body provided".to_string()))?;

    Ok(message_builder.singlepart(SinglePart::plain(text))?)
}
