pub fn render_index(company: Option<&str>) -> String {
    let title = escape_html(company.unwrap_or("Marketing Analytics Dashboard"));
    page("Overview", &title, "/", INDEX_BODY, INDEX_SCRIPT)
}

pub fn render_demographics() -> String {
    page(
        "Demographics",
        "Demographic Performance",
        "/demographic-view",
        DEMOGRAPHICS_BODY,
        DEMOGRAPHICS_SCRIPT,
    )
}

fn page(tab: &str, title: &str, active: &str, body: &str, script: &str) -> String {
    let nav = [("/", "Overview"), ("/demographic-view", "Demographics")]
        .iter()
        .map(|(href, label)| {
            let class = if *href == active { " class=\"active\"" } else { "" };
            format!("<a href=\"{href}\"{class}>{label}</a>")
        })
        .collect::<Vec<_>>()
        .join("");

    LAYOUT_HTML
        .replace("{{TAB}}", tab)
        .replace("{{NAV}}", &nav)
        .replace("{{BODY}}", body)
        .replace("{{SCRIPT}}", script)
        .replace("{{TITLE}}", title)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TAB}} | Marketing Dashboard</title>
  <style>
    :root {
      --bg: #0b1020;
      --panel: rgba(31, 41, 55, 0.6);
      --border: rgba(75, 85, 99, 0.5);
      --ink: #f9fafb;
      --muted: #9ca3af;
      --green: #34d399;
      --error: rgba(239, 68, 68, 0.2);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, #030712, #111827 60%, #030712);
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
      display: grid;
      grid-template-columns: 220px 1fr;
    }

    nav {
      padding: 28px 18px;
      border-right: 1px solid var(--border);
      display: flex;
      flex-direction: column;
      gap: 8px;
    }

    nav a {
      color: var(--muted);
      text-decoration: none;
      padding: 10px 14px;
      border-radius: 12px;
    }

    nav a.active {
      background: rgba(59, 130, 246, 0.2);
      color: var(--ink);
    }

    .hero {
      background: linear-gradient(90deg, #2563eb, #9333ea, #db2777);
      padding: 48px 32px;
      text-align: center;
    }

    .hero h1 {
      margin: 0 0 12px;
      font-size: clamp(2rem, 4vw, 3rem);
    }

    .hero .subtitle {
      margin: 0 auto;
      max-width: 760px;
      opacity: 0.95;
    }

    .banner {
      margin: 16px auto 0;
      max-width: 640px;
      padding: 12px 20px;
      border-radius: 14px;
      border: 1px solid rgba(248, 113, 113, 0.5);
      background: var(--error);
      display: none;
    }

    main {
      padding: 28px 32px 48px;
      display: grid;
      gap: 32px;
    }

    h2 {
      margin: 0 0 16px;
      font-size: 1.3rem;
    }

    .cards {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .card {
      position: relative;
      background: var(--panel);
      border: 1px solid var(--border);
      border-radius: 18px;
      padding: 20px;
      overflow: hidden;
    }

    .card .accent {
      position: absolute;
      inset: 0 0 auto 0;
      height: 4px;
    }

    .card .label {
      color: var(--muted);
      font-size: 0.85rem;
      margin-bottom: 8px;
    }

    .card .value {
      font-size: 1.7rem;
      font-weight: 700;
    }

    .card .value.text-green {
      color: var(--green);
    }

    .charts {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
      gap: 24px;
    }

    .chart {
      background: var(--panel);
      border: 1px solid var(--border);
      border-radius: 18px;
      padding: 20px;
    }

    .chart svg {
      width: 100%;
      height: 260px;
    }

    .chart-label {
      fill: var(--muted);
      font-size: 11px;
    }

    .empty {
      color: var(--muted);
      text-align: center;
      padding: 48px 0;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      background: var(--panel);
      border-radius: 18px;
      overflow: hidden;
    }

    th, td {
      padding: 10px 14px;
      border-bottom: 1px solid var(--border);
      font-size: 0.9rem;
    }

    th {
      cursor: pointer;
      user-select: none;
      color: var(--muted);
      font-weight: 600;
    }

    .pill {
      padding: 2px 10px;
      border-radius: 999px;
      font-size: 0.75rem;
    }

    .pill.male {
      background: #1e3a8a;
      color: #93c5fd;
    }

    .pill.female {
      background: #831843;
      color: #f9a8d4;
    }
  </style>
</head>
<body>
  <nav>{{NAV}}</nav>
  <div>
    <section class="hero">
      <h1 id="title">{{TITLE}}</h1>
      <p class="subtitle" id="subtitle">Loading...</p>
      <div class="banner" id="banner"></div>
    </section>
    <main>{{BODY}}</main>
  </div>
  <script>
    const bannerEl = document.getElementById('banner');
    const subtitleEl = document.getElementById('subtitle');

    const showError = (message) => {
      bannerEl.textContent = `Error: ${message}`;
      bannerEl.style.display = 'block';
      subtitleEl.textContent = '';
    };

    const escapeHtml = (text) =>
      String(text).replace(/[&<>"']/g, (ch) => ({
        '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;'
      })[ch]);

    // Retries while the server is still loading its dataset.
    const loadJson = async (url) => {
      for (;;) {
        const res = await fetch(url);
        if (res.status === 503) {
          await new Promise((resolve) => setTimeout(resolve, 500));
          continue;
        }
        if (!res.ok) {
          const msg = await res.text();
          throw new Error(msg || 'Failed to load data');
        }
        return res.json();
      }
    };

    const renderCards = (el, cards) => {
      el.innerHTML = cards
        .map((card) => `
          <div class="card">
            ${card.gradient ? `<div class="accent" style="background: ${gradientCss(card.gradient)}"></div>` : ''}
            <div class="label">${escapeHtml(card.title)}</div>
            <div class="value ${card.accent || ''}">${escapeHtml(card.value)}</div>
          </div>`)
        .join('');
    };

    const palette = {
      blue: '#3b82f6', cyan: '#06b6d4', green: '#22c55e', emerald: '#10b981',
      purple: '#a855f7', pink: '#ec4899', orange: '#f97316', red: '#ef4444',
      indigo: '#6366f1', teal: '#14b8a6', violet: '#8b5cf6', amber: '#f59e0b',
      rose: '#f43f5e'
    };

    const gradientCss = (gradient) => {
      const colors = gradient
        .split(' ')
        .map((part) => palette[part.replace(/^(from|to)-/, '').replace(/-\d+$/, '')])
        .filter(Boolean);
      return colors.length ? `linear-gradient(90deg, ${colors.join(', ')})` : '#3b82f6';
    };

    {{SCRIPT}}
  </script>
</body>
</html>
"#;

const INDEX_BODY: &str = r#"
      <section>
        <h2>Key Metrics</h2>
        <div class="cards" id="key-metrics"></div>
      </section>
      <section>
        <h2>Performance Highlights</h2>
        <div class="cards" id="highlights"></div>
      </section>
      <section id="insights-section" style="display: none">
        <h2>Market Insights</h2>
        <div class="cards" id="insights"></div>
      </section>
"#;

const INDEX_SCRIPT: &str = r#"
    const load = async () => {
      const overview = await loadJson('/api/overview');
      document.getElementById('title').textContent = overview.company.name;
      subtitleEl.textContent =
        `${overview.company.industry} • Founded ${overview.company.founded} • ${overview.company.description}`;
      renderCards(document.getElementById('key-metrics'), overview.key_metrics);
      renderCards(document.getElementById('highlights'), overview.highlights);
      if (overview.insights) {
        document.getElementById('insights-section').style.display = 'block';
        renderCards(document.getElementById('insights'), overview.insights);
      }
    };

    load().catch((err) => showError(err.message));
"#;

const DEMOGRAPHICS_BODY: &str = r#"
      <section>
        <h2>Gender Performance Summary (Estimated Spend/Revenue)</h2>
        <div class="cards" id="gender-cards"></div>
      </section>
      <section class="charts">
        <div class="chart">
          <h2>Total Spend by Age Group (Estimated)</h2>
          <div id="spend-chart"></div>
        </div>
        <div class="chart">
          <h2>Total Revenue by Age Group (Estimated)</h2>
          <div id="revenue-chart"></div>
        </div>
      </section>
      <section>
        <h2 id="table-title">Demographic Performance Details</h2>
        <table>
          <thead><tr id="table-head"></tr></thead>
          <tbody id="table-body"></tbody>
        </table>
      </section>
"#;

const DEMOGRAPHICS_SCRIPT: &str = r#"
    let sortState = { key: 'revenue', direction: 'desc' };

    const money = (value) => `$${Math.round(value).toLocaleString()}`;

    const renderBarChart = (el, points) => {
      if (!points.length) {
        el.innerHTML = '<div class="empty">No data available</div>';
        return;
      }
      const width = 520;
      const height = 260;
      const paddingX = 16;
      const top = 24;
      const bottom = 32;
      const max = Math.max(...points.map((point) => point.value));
      const slot = (width - paddingX * 2) / points.length;
      const barWidth = Math.min(56, slot * 0.6);
      const scaleY = (height - top - bottom) / max;

      const bars = points
        .map((point, index) => {
          const barHeight = point.value * scaleY;
          const x = paddingX + index * slot + (slot - barWidth) / 2;
          const y = height - bottom - barHeight;
          return `
            <rect x="${x.toFixed(2)}" y="${y.toFixed(2)}" width="${barWidth.toFixed(2)}" height="${barHeight.toFixed(2)}" rx="6" fill="${point.color}" />
            <text class="chart-label" x="${(x + barWidth / 2).toFixed(2)}" y="${(y - 6).toFixed(2)}" text-anchor="middle">${money(point.value)}</text>
            <text class="chart-label" x="${(x + barWidth / 2).toFixed(2)}" y="${height - bottom + 18}" text-anchor="middle">${escapeHtml(point.label)}</text>`;
        })
        .join('');

      el.innerHTML = `<svg viewBox="0 0 ${width} ${height}">${bars}</svg>`;
    };

    const formatCell = (key, value) => {
      if (key === 'gender') {
        const cls = value === 'Male' ? 'male' : 'female';
        return `<span class="pill ${cls}">${escapeHtml(value)}</span>`;
      }
      if (key === 'ctr' || key === 'conversion_rate') {
        return `${value}%`;
      }
      if (key === 'roas') {
        return `<span style="color: var(--green)">${value.toFixed(1)}x</span>`;
      }
      if (typeof value === 'number') {
        return value.toLocaleString();
      }
      return escapeHtml(value);
    };

    const renderTable = (columns, rows) => {
      document.getElementById('table-title').textContent =
        `Demographic Performance Details (${rows.length} groups)`;
      document.getElementById('table-head').innerHTML = ['<th>#</th>']
        .concat(columns.map((column) => {
          const marker = column.key === sortState.key ? (sortState.direction === 'asc' ? ' ▲' : ' ▼') : '';
          return `<th data-key="${column.key}" style="text-align: ${column.align}">${column.header}${marker}</th>`;
        }))
        .join('');

      const body = document.getElementById('table-body');
      if (!rows.length) {
        body.innerHTML = `<tr><td class="empty" colspan="${columns.length + 1}">No demographic data available</td></tr>`;
        return;
      }
      body.innerHTML = rows
        .map((row, index) => `<tr><td>${index + 1}</td>${columns
          .map((column) => `<td style="text-align: ${column.align}">${formatCell(column.key, row[column.key])}</td>`)
          .join('')}</tr>`)
        .join('');
    };

    const load = async () => {
      const query = `sort=${sortState.key}&dir=${sortState.direction}`;
      const data = await loadJson(`/api/demographics?${query}`);
      sortState = data.sort || sortState;
      subtitleEl.textContent = 'Analyze campaign performance across age groups and gender demographics';
      renderCards(document.getElementById('gender-cards'), data.cards);
      renderBarChart(document.getElementById('spend-chart'), data.report.spend_by_age);
      renderBarChart(document.getElementById('revenue-chart'), data.report.revenue_by_age);
      renderTable(data.columns, data.report.rows);
    };

    document.getElementById('table-head').addEventListener('click', (event) => {
      const key = event.target.dataset && event.target.dataset.key;
      if (!key) {
        return;
      }
      const direction = sortState.key === key && sortState.direction === 'asc' ? 'desc' : 'asc';
      sortState = { key, direction };
      load().catch((err) => showError(err.message));
    });

    load().catch((err) => showError(err.message));
"#;
