//! # Resolução de Sobreposições entre Intervalos
//!
//! Os quatro detectores produzem candidatos de forma independente e podem
//! discordar sobre o mesmo trecho de texto. Este módulo impõe a política
//! determinística do sistema: **o primeiro na ordenação vence**.
//!
//! ## Algoritmo
//!
//! 1. Ordena todos os candidatos por `start` crescente; empate por `end`
//!    decrescente (o casamento mais longo primeiro); empate exato por
//!    [`EntityKind::priority`] (canal > link > emoji > nome).
//! 2. Caminha a lista ordenada mantendo o fim do último intervalo aceito.
//!    Um candidato é mantido somente se não compartilha nenhum offset com o
//!    que já foi aceito; caso contrário é rejeitado **inteiro** — nunca
//!    truncado.
//!
//! É a variante gulosa clássica de agendamento de intervalos: como os aceitos
//! ficam ordenados por início e não se sobrepõem, seus fins são monotônicos e
//! basta comparar com o último. Intervalos adjacentes (fim de um igual ao
//! início do próximo) são ambos mantidos.

use crate::entity::EntityRange;

/// Verifica se dois intervalos semi-abertos compartilham algum offset.
pub fn any_intersection(a: &EntityRange, b: &EntityRange) -> bool {
    a.start < b.end && b.start < a.end
}

/// Resolve os candidatos em um conjunto sem sobreposições.
pub fn resolve(candidates: Vec<EntityRange>) -> Vec<EntityRange> {
    resolve_with_rejections(candidates).0
}

/// Como [`resolve`], mas devolve também os candidatos rejeitados, na ordem
/// em que foram descartados — o fluxo de eventos da visualização usa isso.
pub fn resolve_with_rejections(
    mut candidates: Vec<EntityRange>,
) -> (Vec<EntityRange>, Vec<EntityRange>) {
    // Detectores nunca produzem intervalos vazios ou invertidos; se algum
    // aparecer por defeito, é rejeitado aqui
    candidates.retain(|c| c.start < c.end);

    candidates.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then(b.end.cmp(&a.end))
            .then(a.kind().priority().cmp(&b.kind().priority()))
    });

    let mut kept: Vec<EntityRange> = Vec::new();
    let mut dropped: Vec<EntityRange> = Vec::new();
    let mut last_end = 0usize;

    for candidate in candidates {
        if kept.is_empty() || candidate.start >= last_end {
            last_end = candidate.end;
            kept.push(candidate);
        } else {
            dropped.push(candidate);
        }
    }

    (kept, dropped)
}
