//! Prompt rendering for salary advice.

use wagebook_core::{format_amount, Currency, SalaryInputs};

/// Everything the advice service is told about a calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdviceRequest {
    pub hourly_rate: f64,
    pub work_hours: f64,
    pub total: i64,
    pub currency: Currency,
}

impl AdviceRequest {
    /// Build a request from quick-calculator inputs; the total is computed here.
    #[must_use]
    pub fn from_inputs(inputs: SalaryInputs, currency: Currency) -> Self {
        Self {
            hourly_rate: inputs.hourly_rate,
            work_hours: inputs.work_hours,
            total: inputs.total(),
            currency,
        }
    }
}

/// Render the request as a Traditional Chinese prompt asking for a short,
/// friendly financial comment.
#[must_use]
pub fn render_prompt(request: &AdviceRequest) -> String {
    let currency = request.currency.code();
    format!(
        "我是一個薪水計算應用程式。使用者輸入了以下數據：\n\
         - 時薪: {rate} {currency}\n\
         - 工作時數: {hours} 小時\n\
         \n\
         計算結果如下：\n\
         - 總薪資約: {total} {currency}\n\
         \n\
         請以繁體中文提供一段簡短、友善且專業的財務分析或建議（約 150 字內）。\n\
         內容可以包含：\n\
         1. 這個收入水平在一般情況下的生活品質評估（僅供參考）。\n\
         2. 針對此收入水平的簡單理財或儲蓄小撇步。\n\
         3. 鼓勵的話語。\n\
         請直接給出建議內容，不需要開頭問候。",
        rate = request.hourly_rate,
        hours = request.work_hours,
        total = format_amount(request.total),
    )
}
