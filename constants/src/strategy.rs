/// Default generation endpoint base URL
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default generation model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// System instruction sent with every strategy request
pub const SYSTEM_INSTRUCTION: &str = "Eres un estratega digital senior de la agencia KN Growth. Tu tono es profesional, minimalista y directo al grano.";

/// Instruction template; `{niche}` is replaced with the trimmed niche text
pub const PROMPT_TEMPLATE: &str = "Actúa como un consultor experto en Growth Hacking y Landing Pages.\nEl usuario quiere crear un sitio web para el nicho: \"{niche}\".\nGenera una estructura estratégica persuasiva, corta y directa.";

/// Field descriptions for the response schema
pub const HEADLINE_DESCRIPTION: &str = "Un titular de alto impacto para la landing page.";
pub const KEY_POINTS_DESCRIPTION: &str = "3 puntos clave de valor para convencer al usuario.";
pub const CALL_TO_ACTION_DESCRIPTION: &str = "Un texto persuasivo para el botón de acción.";

/// Number of key points a strategy must carry
pub const KEY_POINT_COUNT: usize = 3;

/// Generic message shown when a request fails
pub const ERROR_MESSAGE: &str = "Ocurrió un error al conectar con la inteligencia. Inténtalo de nuevo.";

pub const INPUT_PLACEHOLDER: &str = "Ej: Inmobiliaria de lujo, Venta de Café, SaaS B2B...";
