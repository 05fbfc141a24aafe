// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use std::fmt;

use serde::Deserialize;

/// Lifecycle events emitted by a voice assistant session. Strategies are bound to one of
/// these and only ever compare them for equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum AssistantEvent {
    /// The assistant finished starting up and is ready for a hotword.
    StartFinished,

    /// A conversation turn started and the assistant is listening.
    ConversationTurnStarted,

    /// The user stopped speaking.
    EndOfUtterance,

    /// Speech recognition produced its final result.
    RecognizingSpeechFinished,

    /// The assistant started speaking its response.
    RespondingStarted,

    /// The assistant finished speaking its response.
    RespondingFinished,

    /// The turn ended without a response.
    NoResponse,

    /// The turn timed out waiting for the user.
    ConversationTurnTimeout,

    /// The conversation turn is over.
    ConversationTurnFinished,

    /// The microphone was muted or unmuted.
    MuteChanged,

    AlertStarted,
    AlertFinished,
}

impl fmt::Display for AssistantEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssistantEvent::StartFinished => "ON_START_FINISHED",
            AssistantEvent::ConversationTurnStarted => "ON_CONVERSATION_TURN_STARTED",
            AssistantEvent::EndOfUtterance => "ON_END_OF_UTTERANCE",
            AssistantEvent::RecognizingSpeechFinished => "ON_RECOGNIZING_SPEECH_FINISHED",
            AssistantEvent::RespondingStarted => "ON_RESPONDING_STARTED",
            AssistantEvent::RespondingFinished => "ON_RESPONDING_FINISHED",
            AssistantEvent::NoResponse => "ON_NO_RESPONSE",
            AssistantEvent::ConversationTurnTimeout => "ON_CONVERSATION_TURN_TIMEOUT",
            AssistantEvent::ConversationTurnFinished => "ON_CONVERSATION_TURN_FINISHED",
            AssistantEvent::MuteChanged => "ON_MUTED_CHANGED",
            AssistantEvent::AlertStarted => "ON_ALERT_STARTED",
            AssistantEvent::AlertFinished => "ON_ALERT_FINISHED",
        };
        f.write_str(name)
    }
}
