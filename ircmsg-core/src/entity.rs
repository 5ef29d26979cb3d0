//! # Modelo de Entidades Detectadas
//!
//! Define os tipos compartilhados por todos os detectores: o tipo da
//! entidade ([`EntityKind`]), os dados específicos de cada variante
//! ([`EntityData`]) e o intervalo detectado no texto plano ([`EntityRange`]).
//!
//! ## Tipos de Entidade
//!
//! | Tipo    | Exemplo              | Valor carregado          |
//! |---------|----------------------|--------------------------|
//! | CHANNEL | `#rust`              | nome do canal            |
//! | LINK    | `https://exemplo.com`| URL detectada            |
//! | EMOJI   | `🔥` ou `:fire:`     | o símbolo emoji          |
//! | NAME    | `alice`              | o apelido mencionado     |
//!
//! A prioridade de resolução de conflitos é um índice **explícito**
//! ([`EntityKind::priority`]) em vez de depender da ordem incidental de
//! concatenação das listas — canal > link > emoji > nome.

use serde::{Deserialize, Serialize};

/// Tipos de entidade reconhecidos pelo motor de anotação.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// **Canal**: referência a um canal IRC. Ex: `#rust`, `&local`.
    Channel,
    /// **Link**: URL com esquema qualificado. Ex: `https://exemplo.com`.
    Link,
    /// **Emoji**: emoji literal ou shortcode conhecido. Ex: `🎉`, `:tada:`.
    Emoji,
    /// **Nome**: menção a um apelido conhecido da conversa.
    Name,
}

impl EntityKind {
    /// Nome do tipo como string (para serialização e UI)
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Channel => "CHANNEL",
            EntityKind::Link => "LINK",
            EntityKind::Emoji => "EMOJI",
            EntityKind::Name => "NAME",
        }
    }

    /// Cor CSS para highlight na UI
    pub fn color(&self) -> &'static str {
        match self {
            EntityKind::Channel => "#10b981", // verde esmeralda
            EntityKind::Link => "#3b82f6",    // azul
            EntityKind::Emoji => "#f59e0b",   // âmbar
            EntityKind::Name => "#8b5cf6",    // violeta
        }
    }

    /// Ícone para o tipo na UI
    pub fn icon(&self) -> &'static str {
        match self {
            EntityKind::Channel => "#",
            EntityKind::Link => "🔗",
            EntityKind::Emoji => "😀",
            EntityKind::Name => "@",
        }
    }

    /// Prioridade na resolução de conflitos (menor vence em empate exato).
    ///
    /// Canal > Link > Emoji > Nome, a leitura explícita da ordem de
    /// concatenação dos detectores no cliente original.
    pub fn priority(&self) -> usize {
        match self {
            EntityKind::Channel => 0,
            EntityKind::Link => 1,
            EntityKind::Emoji => 2,
            EntityKind::Name => 3,
        }
    }

    /// Tenta parsear a partir de string (ex: "CHANNEL" → Some(Channel))
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "CHANNEL" => Some(EntityKind::Channel),
            "LINK" => Some(EntityKind::Link),
            "EMOJI" => Some(EntityKind::Emoji),
            "NAME" => Some(EntityKind::Name),
            _ => None,
        }
    }
}

/// Dados específicos de cada variante de entidade.
///
/// Exatamente uma variante está ativa por intervalo resolvido — o intervalo
/// é polimórfico sobre {Channel, Link, Emoji, Name}.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityData {
    Channel { channel: String },
    Link { link: String },
    Emoji { emoji: String },
    Name { nick: String },
}

impl EntityData {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityData::Channel { .. } => EntityKind::Channel,
            EntityData::Link { .. } => EntityKind::Link,
            EntityData::Emoji { .. } => EntityKind::Emoji,
            EntityData::Name { .. } => EntityKind::Name,
        }
    }

    /// O valor textual carregado pela variante ativa
    pub fn value(&self) -> &str {
        match self {
            EntityData::Channel { channel } => channel,
            EntityData::Link { link } => link,
            EntityData::Emoji { emoji } => emoji,
            EntityData::Name { nick } => nick,
        }
    }
}

/// Um intervalo candidato detectado no texto plano.
///
/// `start` e `end` são offsets de byte no texto plano, com `end` exclusivo e
/// `start < end` sempre — os detectores nunca emitem intervalos vazios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRange {
    pub start: usize,
    pub end: usize,
    pub data: EntityData,
}

impl EntityRange {
    pub fn channel(start: usize, end: usize, channel: String) -> Self {
        Self { start, end, data: EntityData::Channel { channel } }
    }

    pub fn link(start: usize, end: usize, link: String) -> Self {
        Self { start, end, data: EntityData::Link { link } }
    }

    pub fn emoji(start: usize, end: usize, emoji: String) -> Self {
        Self { start, end, data: EntityData::Emoji { emoji } }
    }

    pub fn name(start: usize, end: usize, nick: String) -> Self {
        Self { start, end, data: EntityData::Name { nick } }
    }

    pub fn kind(&self) -> EntityKind {
        self.data.kind()
    }

    pub fn value(&self) -> &str {
        self.data.value()
    }
}
