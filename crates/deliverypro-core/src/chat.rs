//! # Chat Module
//!
//! The scripted WhatsApp-style responder.
//!
//! There is no AI here: incoming text is classified by keyword into a small
//! intent set and answered with a canned reply, exactly like the demo chat
//! on the dashboard. The server owns the conversation log and the simulated
//! typing delay; this module is the pure part.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

// =============================================================================
// Chat Message
// =============================================================================

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ChatSender {
    Customer,
    Bot,
}

/// One message in the conversation log.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ChatMessage {
    pub id: String,
    pub sender: ChatSender,
    pub content: String,
    #[ts(as = "String")]
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    fn new(sender: ChatSender, content: impl Into<String>) -> Self {
        ChatMessage {
            id: Uuid::new_v4().to_string(),
            sender,
            content: content.into(),
            sent_at: Utc::now(),
        }
    }

    /// A message from the customer side of the conversation.
    pub fn customer(content: impl Into<String>) -> Self {
        ChatMessage::new(ChatSender::Customer, content)
    }

    /// A message from the scripted bot.
    pub fn bot(content: impl Into<String>) -> Self {
        ChatMessage::new(ChatSender::Bot, content)
    }
}

// =============================================================================
// Intent Classification
// =============================================================================

/// What the customer seems to be asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ChatIntent {
    /// Price questions ("quanto custa a margherita?").
    Pricing,
    /// Delivery fee / radius / time questions.
    Delivery,
    /// Opening hours.
    OpeningHours,
    /// Thanks / goodbye.
    Thanks,
    /// Anything else: steered toward the menu and ordering.
    Other,
}

/// Classifies a customer message by keyword.
///
/// Matching is substring-based over the lowercased input, so conjugations
/// like "obrigada"/"obrigado" share one stem. First match wins, in the
/// order below.
pub fn classify_intent(input: &str) -> ChatIntent {
    let input = input.to_lowercase();

    if ["preço", "valor", "quanto"].iter().any(|k| input.contains(k)) {
        return ChatIntent::Pricing;
    }
    if ["entrega", "delivery"].iter().any(|k| input.contains(k)) {
        return ChatIntent::Delivery;
    }
    if ["horário", "funcionamento"].iter().any(|k| input.contains(k)) {
        return ChatIntent::OpeningHours;
    }
    if ["obrigad", "valeu"].iter().any(|k| input.contains(k)) {
        return ChatIntent::Thanks;
    }

    ChatIntent::Other
}

/// The canned reply for one intent.
pub const fn reply_for(intent: ChatIntent) -> &'static str {
    match intent {
        ChatIntent::Pricing => {
            "Nossos preços variam por categoria:\n\n\
             Pizzas: R$ 35,90 - R$ 55,90\n\
             Hambúrguers: R$ 28,90 - R$ 42,90\n\
             Massas: R$ 32,90 - R$ 48,90\n\n\
             Qual produto específico você gostaria de saber o preço?"
        }
        ChatIntent::Delivery => {
            "Informações sobre entrega:\n\n\
             • Taxa: R$ 5,90\n\
             • Tempo: 35-45 minutos\n\
             • Raio de entrega: 5km\n\n\
             Qual seu endereço para confirmar se entregamos?"
        }
        ChatIntent::OpeningHours => {
            "Nosso horário de funcionamento:\n\n\
             • Segunda a Quinta: 11h às 23h\n\
             • Sexta e Sábado: 11h às 00h\n\
             • Domingo: 11h às 22h\n\n\
             Estamos abertos agora e recebendo pedidos!"
        }
        ChatIntent::Thanks => {
            "Por nada! Foi um prazer ajudar você!\n\n\
             Se precisar de mais alguma coisa ou quiser fazer um pedido, \
             é só chamar. Estamos sempre aqui para te atender!"
        }
        ChatIntent::Other => {
            "Entendi! Deixe-me ajudar você com isso.\n\n\
             Posso te mostrar nosso cardápio completo, informar preços, ou \
             se preferir, já podemos começar seu pedido. O que você \
             gostaria de fazer?"
        }
    }
}

/// Classifies and answers in one call.
pub fn scripted_reply(input: &str) -> &'static str {
    reply_for(classify_intent(input))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_pricing() {
        assert_eq!(classify_intent("Quanto custa a margherita?"), ChatIntent::Pricing);
        assert_eq!(classify_intent("qual o valor da pizza"), ChatIntent::Pricing);
    }

    #[test]
    fn test_classify_delivery() {
        assert_eq!(classify_intent("Vocês fazem entrega?"), ChatIntent::Delivery);
        assert_eq!(classify_intent("tem DELIVERY ai?"), ChatIntent::Delivery);
    }

    #[test]
    fn test_classify_opening_hours() {
        assert_eq!(classify_intent("qual o horário de vocês"), ChatIntent::OpeningHours);
        assert_eq!(classify_intent("Funcionamento no domingo?"), ChatIntent::OpeningHours);
    }

    #[test]
    fn test_classify_thanks_shares_stem() {
        assert_eq!(classify_intent("obrigado!"), ChatIntent::Thanks);
        assert_eq!(classify_intent("Obrigada, valeu"), ChatIntent::Thanks);
    }

    #[test]
    fn test_classify_fallback() {
        assert_eq!(classify_intent("quero uma pizza"), ChatIntent::Other);
    }

    #[test]
    fn test_scripted_reply_routes_to_intent() {
        assert!(scripted_reply("quanto custa?").contains("R$ 35,90"));
        assert!(scripted_reply("tem entrega?").contains("Taxa: R$ 5,90"));
        assert!(scripted_reply("horário?").contains("Segunda a Quinta"));
        assert!(scripted_reply("olá").contains("cardápio"));
    }

    #[test]
    fn test_message_constructors() {
        let msg = ChatMessage::customer("Oi");
        assert_eq!(msg.sender, ChatSender::Customer);
        assert_eq!(msg.content, "Oi");

        let reply = ChatMessage::bot(scripted_reply("Oi"));
        assert_eq!(reply.sender, ChatSender::Bot);
        assert_ne!(msg.id, reply.id);
    }
}
