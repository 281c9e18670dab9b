//! # Chat State
//!
//! The WhatsApp-simulation conversation log.
//!
//! One global conversation, like the dashboard demo: the operator watches
//! the scripted bot answer an imaginary customer. Messages only grow; a
//! restart wipes them along with everything else.

use std::sync::Mutex;

use deliverypro_core::chat::ChatMessage;

/// Shared conversation log.
#[derive(Debug)]
pub struct ChatState {
    messages: Mutex<Vec<ChatMessage>>,
}

impl ChatState {
    /// Creates the log with the bot's opening greeting.
    pub fn new() -> Self {
        ChatState {
            messages: Mutex::new(vec![ChatMessage::bot(
                "Olá! Bem-vindo à Pizzaria Demo! Posso te mostrar o cardápio, \
                 informar preços ou começar seu pedido. Como posso ajudar?",
            )]),
        }
    }

    /// Appends one message.
    pub fn push(&self, message: ChatMessage) {
        let mut messages = self.messages.lock().expect("chat mutex poisoned");
        messages.push(message);
    }

    /// The whole conversation, oldest first.
    pub fn all(&self) -> Vec<ChatMessage> {
        self.messages.lock().expect("chat mutex poisoned").clone()
    }
}

impl Default for ChatState {
    fn default() -> Self {
        ChatState::new()
    }
}
