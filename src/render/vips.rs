use super::{RenderContext, dataset, fill};
use crate::data::Vip;
use crate::dom::{Document, escape};

pub const VIPS_GRID_TARGET: &str = ".vips-grid";

pub fn render(doc: &mut Document, ctx: &RenderContext<'_>) {
    let Some(roster) = dataset(ctx.data.vips()) else {
        return;
    };
    let html: String = roster.vips.iter().map(vip_markup).collect();
    fill(doc, VIPS_GRID_TARGET, &html);
}

fn detail(icon: &str, text: &str) -> String {
    format!(
        r#"
        <div class="detail-item">
            <i class="fas {icon}"></i>
            {text}
        </div>"#
    )
}

pub fn vip_markup(vip: &Vip) -> String {
    let details = [
        detail(
            "fa-crown",
            &format!(r#"<span class="level">{}</span>"#, escape(&vip.level)),
        ),
        detail(
            "fa-calendar-alt",
            &format!(
                "<span>{} 至 {}</span>",
                escape(&vip.start_date),
                escape(&vip.end_date)
            ),
        ),
        detail(
            "fa-user-shield",
            &format!("<span>操作管理员: {}</span>", escape(&vip.admin)),
        ),
        detail(
            "fa-clock",
            &format!("<span>最后在线: {}</span>", escape(&vip.last_online)),
        ),
        detail(
            "fa-comment",
            &format!("<span>备注: {}</span>", escape(&vip.note)),
        ),
    ]
    .concat();

    format!(
        r#"
<div class="vip-card">
    <div class="vip-header">
        <img src="{avatar}" class="vip-avatar">
        <div class="vip-info">
            <h3>{name}</h3>
            <span class="steam-id">{steam_id}</span>
        </div>
        <div class="vip-status {status}">{status}</div>
    </div>
    <div class="vip-details">{details}
    </div>
    <div class="vip-actions">
        <button class="btn"><i class="fas fa-edit"></i> 编辑</button>
        <button class="btn"><i class="fas fa-history"></i> 续期</button>
        <button class="btn danger"><i class="fas fa-trash"></i> 删除</button>
    </div>
</div>"#,
        avatar = escape(&vip.avatar),
        name = escape(&vip.name),
        steam_id = escape(&vip.steam_id),
        status = vip.status.as_str(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataSource, MockData, VipStatus};
    use crate::dom::Selector;
    use crate::test_support::render_ctx;

    #[test]
    fn test_expired_vip_is_marked() {
        let vips = MockData.vips().unwrap().vips;
        let veteran = vips.iter().find(|v| v.name == "Veteran_User").unwrap();
        assert_eq!(veteran.status, VipStatus::Expired);
        let html = vip_markup(veteran);
        assert!(html.contains(r#"<div class="vip-status expired">expired</div>"#));
    }

    #[test]
    fn test_grid_filled() {
        let mut doc = Document::from_markup(r#"<div class="vips-grid"></div>"#);
        render(&mut doc, &render_ctx(&MockData));
        assert_eq!(doc.count(&Selector::fixed(".vip-card")), 10);
        assert_eq!(doc.count(&Selector::fixed(".vip-status.expired")), 2);
        assert_eq!(doc.count(&Selector::fixed(".vip-card .detail-item")), 50);
    }

    #[test]
    fn test_free_text_is_escaped() {
        let mut vip = MockData.vips().unwrap().vips.remove(0);
        vip.note = "<script>alert(1)</script>".to_string();
        let html = vip_markup(&vip);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
