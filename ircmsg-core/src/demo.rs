//! # Mensagens de Demonstração
//!
//! Mensagens IRC de exemplo cobrindo cada recurso do motor, usadas pela
//! interface web para demonstração interativa. Cada mensagem vem rotulada
//! com o recurso que exercita.

/// Retorna as mensagens de demonstração como pares (recurso, texto bruto)
pub fn demo_messages() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "canais",
            "pessoal, migramos de #legacy para #rust-br e &local hoje",
        ),
        (
            "links",
            "release publicado: https://github.com/exemplo/projeto/releases/tag/v1.2 (changelog em https://exemplo.com/changelog).",
        ),
        (
            "emoji",
            "deploy saiu sem erros :tada: 🔥 grande dia!",
        ),
        (
            "menções",
            "alice e bob, o review de vocês está pronto",
        ),
        (
            "negrito e cores",
            "\u{2}atenção\u{2}: o servidor \u{3}4cai às 22h\u{3} para manutenção",
        ),
        (
            "cores hex",
            "tema novo: \u{4}ff8800laranja\u{4} e \u{4}0088ff,222222azul sobre cinza\u{f} — gostaram?",
        ),
        (
            "estilos combinados",
            "\u{1d}itálico\u{1d}, \u{1f}sublinhado\u{1f}, \u{1e}tachado\u{1e} e \u{11}monospace\u{11} na mesma linha",
        ),
        (
            "tudo junto",
            "\u{2}urgente\u{2}: alice, veja https://status.exemplo.com e avise no #ops :eyes:",
        ),
        (
            "conflito de detectores",
            "log em http://ci.exemplo.com/bob/123 — o apelido dentro da URL não vira menção",
        ),
        (
            "códigos malformados",
            "cor sem dígito \u{3} e hex inválido \u{4}xyz ficam literais",
        ),
    ]
}

/// Apelidos de exemplo para o detector de menções na demonstração
pub fn demo_nicknames() -> Vec<String> {
    ["alice", "bob", "carol", "ze[afk]"]
        .iter()
        .map(|n| n.to_string())
        .collect()
}
