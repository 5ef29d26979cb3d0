//! # Fusão de Entidades com Fragmentos de Estilo
//!
//! Último estágio do motor: combina os intervalos de entidade resolvidos
//! (sem sobreposição, ordenados por início) com a sequência de fragmentos de
//! estilo (contígua, cobrindo todo o texto) em uma sequência ordenada de
//! [`TextPart`] pronta para renderização.
//!
//! As lacunas entre entidades viram partes planas. Cada parte recebe os
//! fragmentos de estilo que a sobrepõem, **fatiados** exatamente ao seu
//! trecho: um fragmento que atravessa a fronteira de uma parte é dividido em
//! cópias com os mesmos atributos e texto truncado. Assim nenhuma unidade
//! renderizada atravessa um ponto onde a classificação de entidade ou o
//! conjunto de atributos de estilo muda.
//!
//! Invariante: as partes particionam o texto plano na ordem original, sem
//! lacunas e sem sobreposições.

use serde::{Deserialize, Serialize};

use crate::entity::{EntityData, EntityKind, EntityRange};
use crate::style::StyleFragment;

/// Unidade atômica final: um trecho do texto com uma classificação de
/// entidade (ou nenhuma) e os fragmentos de estilo ativos dentro dele.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextPart {
    /// Offset de byte inicial no texto plano (inclusivo).
    pub start: usize,
    /// Offset de byte final no texto plano (exclusivo).
    pub end: usize,
    /// A entidade coberta por esta parte, se houver.
    pub entity: Option<EntityData>,
    /// Fragmentos de estilo restritos a `[start, end)`, em ordem.
    pub fragments: Vec<StyleFragment>,
}

impl TextPart {
    /// O tipo da entidade desta parte, se houver
    pub fn kind(&self) -> Option<EntityKind> {
        self.entity.as_ref().map(|e| e.kind())
    }

    pub fn is_plain(&self) -> bool {
        self.entity.is_none()
    }

    /// O texto plano coberto por esta parte
    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }
}

/// Funde intervalos resolvidos e fragmentos de estilo em partes ordenadas.
///
/// `resolved` deve vir do resolvedor (ordenado por início, sem
/// sobreposições); `fragments` deve cobrir o texto plano inteiro.
/// Texto vazio produz sequência vazia.
pub fn merge_parts(
    resolved: &[EntityRange],
    fragments: &[StyleFragment],
    plain: &str,
) -> Vec<TextPart> {
    let mut parts = Vec::new();
    let mut position = 0usize;

    for range in resolved {
        // Preenche a lacuna antes da entidade com uma parte plana
        if range.start > position {
            parts.push(build_part(position, range.start, None, fragments));
        }
        parts.push(build_part(
            range.start,
            range.end,
            Some(range.data.clone()),
            fragments,
        ));
        position = range.end;
    }

    if position < plain.len() {
        parts.push(build_part(position, plain.len(), None, fragments));
    }

    debug_assert!(
        parts.iter().map(|p| p.end - p.start).sum::<usize>() == plain.len(),
        "as partes devem particionar o texto plano"
    );

    parts
}

fn build_part(
    start: usize,
    end: usize,
    entity: Option<EntityData>,
    fragments: &[StyleFragment],
) -> TextPart {
    TextPart {
        start,
        end,
        entity,
        fragments: slice_fragments(fragments, start, end),
    }
}

/// Fatia os fragmentos que sobrepõem `[start, end)` exatamente a esse trecho
fn slice_fragments(fragments: &[StyleFragment], start: usize, end: usize) -> Vec<StyleFragment> {
    fragments
        .iter()
        .filter(|f| f.start < end && start < f.end)
        .map(|f| {
            let s = f.start.max(start);
            let e = f.end.min(end);
            StyleFragment {
                text: f.text[s - f.start..e - f.start].to_string(),
                start: s,
                end: e,
                ..f.clone()
            }
        })
        .collect()
}
