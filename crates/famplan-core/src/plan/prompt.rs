//! Prompt construction for a city query.
//!
//! The user message fixes the reply format (`<n>. **[Title]**: [description]`)
//! that [`super::parser::parse_plans`] depends on. Change both together.

use famplan_types::llm::ChatMessage;

/// Number of activities requested from the model.
pub const PLAN_COUNT: u32 = 10;

const SYSTEM_PROMPT: &str = "Eres un asistente de viajes en familia, experto en turismo \
sostenible y de bajo coste. Respondes siempre en español, de forma clara, cercana y \
bien organizada. Todo plan que propongas debe ser apropiado para niños, pensado para \
disfrutar en familia y gratuito o de muy bajo coste.";

/// Build the conversation for `city`: exactly one system and one user message.
///
/// The city name is embedded verbatim.
pub fn build_prompt(city: &str) -> Vec<ChatMessage> {
    let user = format!(
        "Dame exactamente {PLAN_COUNT} planes recomendados para hacer en {city} \
         con niños y en familia, que sean gratuitos o de muy bajo coste.\n\n\
         Formato de respuesta obligatorio:\n\
         1. **[Nombre del plan]**: [Descripción breve de 1-2 frases. \
         Indica si es gratuito o su coste aproximado.]\n\
         2. ...\n\
         ...\n\
         {PLAN_COUNT}. ...\n\n\
         No añadas introducción ni conclusión, solo la lista numerada del 1 al {PLAN_COUNT}."
    );

    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(user)]
}
