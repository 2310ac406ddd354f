//! Travel-agent instruction prompt.

/// Marker that opens every day header in the generated itinerary.
pub const DAY_MARKER: &str = "🗓️";
/// Marker that opens every activity line.
pub const POINT_MARKER: &str = "→";

/// Raw input for one organize action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub raw_components: String,
    pub duration_label: String,
}

impl PromptRequest {
    pub fn new(raw_components: impl Into<String>, duration_label: impl Into<String>) -> Self {
        Self {
            raw_components: raw_components.into(),
            duration_label: duration_label.into(),
        }
    }

    pub fn build(&self) -> String {
        build_prompt(&self.raw_components, &self.duration_label)
    }
}

/// Interpolate the raw components and duration into the fixed instruction template.
/// Inputs are used verbatim.
pub fn build_prompt(raw_components: &str, duration_label: &str) -> String {
    format!(
        "\
You are an expert travel agent assistant. Your task is to take raw itinerary components and organize them into a day-by-day plan.

Here are the raw itinerary components:
{raw_components}

The trip duration is {duration_label}.

Please format the output exactly as follows:
- Each day starts with: {DAY_MARKER}Day \"n\" : One liner brief of the day
- Each activity point starts with: {POINT_MARKER} (use the arrow symbol, not bullet points)
- Each day must have a minimum of 4 to 5 points, clearly detailed and catchy.
- EXCEPTION: For days that are primarily \"Departure\" days with no significant activities other than transfer, limit the points to a maximum of 2, ensuring they are concise and brief.
- Put every activity point on its own line.

Here is an example of the desired format for a day (ensure you follow the \"{POINT_MARKER}\" arrow strictly):
{DAY_MARKER}Day 1 : Arrival & Enchanting City Discoveries
{POINT_MARKER} Arrive in Singapore and enjoy a seamless private transfer to your hotel.
{POINT_MARKER} Embark on a comprehensive 3-hour City Tour, uncovering Singapore's vibrant heart.
{POINT_MARKER} Capture stunning photos at iconic landmarks like the majestic Singapore Flyer.
{POINT_MARKER} Drive past architectural gems including Raffles Hotel and the poignant War Memorial Park.
{POINT_MARKER} Conclude your city insights with a visit to a charming Gift Shop and explore Chinatown.

Please ensure all the provided tours and transfers are incorporated logically into the {duration_label} duration.
Focus on creating engaging and appealing descriptions for each point.
Do not include any introductory or concluding remarks outside the formatted itinerary. Just output the itinerary.
"
    )
}

/// Example raw components (`--sample`).
pub const SAMPLE_COMPONENTS: &str = "\
Tours:
- City Tour (3hrs) ** SIC Basis  ** (Singapore Flyer and Merlion [2 Photostops], Drive Past: Raffles Hotel, Swiss Hotel, War Memorial Park, Suntec City, Supreme Court, Gift Shop, and Chinatown, ending at Little India.)
- Singapore River Cruise ** PVT Basis  **
- Gardens by the Bay: Flower Dome + Cloud Forest [Jurassic World: The Exhibition} (29 May 2025 - 31 March 2026) ** SIC Basis  **
- Night Safari (Admission + Tram)(01 Oct 25 Onwards) ** SIC Basis  **

Transfers:
 - (1) Arrival / (1) Departure Transfers (Private basis)
 - (5) Tour Transfer - City Tour (3hrs), Gardens by the Bay: Flower Dome + Cloud Forest [Jurassic World: The Exhibition} (29 May 2025 - 31 March 2026), Night Safari (Admission + Tram)(01 Oct 25 Onwards) (Seat in Coach basis)
 - (2) Tour Transfers  - Singapore River Cruise (Private basis)
";
