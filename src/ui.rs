pub fn render_index() -> &'static str {
    INDEX_HTML
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Habit Tracker</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --done: #39b57a;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1280px, 100%);
      margin: 0 auto;
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      justify-content: space-between;
      gap: 16px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.8rem, 4vw, 2.6rem);
      margin: 0;
    }

    .controls {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
      align-items: center;
    }

    select, input[type="number"], input[type="text"], input[type="time"] {
      font: inherit;
      padding: 8px 12px;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      background: white;
    }

    button, .file-btn {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 16px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent-2);
      color: white;
    }

    button.primary {
      background: var(--accent);
    }

    button.icon-btn {
      padding: 4px 8px;
      background: transparent;
      color: var(--accent-2);
    }

    button:disabled {
      opacity: 0.35;
      cursor: default;
    }

    .kpis {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .stat .label {
      display: block;
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      display: block;
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .weeks {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
    }

    .week-card {
      display: flex;
      align-items: center;
      gap: 10px;
      background: white;
      border-radius: 16px;
      padding: 10px 14px;
    }

    .habit-list {
      display: grid;
      gap: 8px;
    }

    .habit-item {
      display: grid;
      grid-template-columns: 40px 1fr auto auto;
      align-items: center;
      gap: 12px;
      background: white;
      border-radius: 14px;
      padding: 8px 12px;
    }

    .habit-item .meta {
      font-size: 0.85rem;
      color: #7a746d;
    }

    .table-wrap {
      overflow-x: auto;
    }

    table {
      border-collapse: collapse;
      font-size: 0.85rem;
    }

    th, td {
      padding: 4px;
      text-align: center;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
    }

    th:first-child, td:first-child {
      text-align: left;
      white-space: nowrap;
    }

    th.weekend {
      color: var(--accent);
    }

    .status {
      min-height: 1.2em;
      color: #6b645d;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    dialog {
      border: none;
      border-radius: 20px;
      box-shadow: var(--shadow);
      padding: 24px;
    }

    dialog form {
      display: grid;
      gap: 12px;
    }

    @media print {
      .controls, .habit-item .actions, .status {
        display: none;
      }
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1 id="title">Habit Tracker</h1>
      <div class="controls">
        <select id="month-select"></select>
        <input id="year-input" type="number" min="1" max="9999" />
        <button id="today-btn">Today</button>
        <button id="add-btn" class="primary">Add habit</button>
        <button id="print-btn">Print</button>
        <button id="export-btn">Export</button>
        <label class="file-btn">Import<input id="import-input" type="file" accept="application/json" hidden /></label>
        <button id="reset-btn">Reset</button>
      </div>
    </header>

    <div class="status" id="status"></div>

    <section class="kpis">
      <div class="stat"><span class="label">Overall</span><span class="value" id="overall-pct">0%</span></div>
      <div class="stat"><span class="label">Done</span><span class="value" id="done-count">0</span></div>
      <div class="stat"><span class="label">Possible</span><span class="value" id="total-count">0</span></div>
      <div class="stat"><span class="label">Perfect days</span><span class="value" id="perfect-days">0</span></div>
    </section>

    <section class="weeks" id="weeks"></section>
    <section class="habit-list" id="habit-list"></section>
    <section class="table-wrap"><table id="tracker"></table></section>
  </main>

  <dialog id="habit-dialog">
    <form method="dialog">
      <h2 id="dialog-title">Add habit</h2>
      <input id="habit-id" type="hidden" />
      <label>Name <input id="habit-name" type="text" /></label>
      <label>Icon <input id="habit-icon" type="text" maxlength="4" /></label>
      <label><input id="habit-reminder" type="checkbox" /> Daily reminder</label>
      <label>Reminder time <input id="habit-time" type="time" value="20:00" /></label>
      <label>Weekly goal <input id="habit-goal" type="number" min="1" max="7" value="4" /></label>
      <div class="controls">
        <button value="cancel">Cancel</button>
        <button value="default" class="primary">Save</button>
      </div>
    </form>
  </dialog>

  <script>
    const MONTHS = ['January', 'February', 'March', 'April', 'May', 'June',
      'July', 'August', 'September', 'October', 'November', 'December'];

    const $ = (id) => document.getElementById(id);
    const statusEl = $('status');
    const dialog = $('habit-dialog');
    let view = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const api = async (path, options = {}) => {
      const res = await fetch(path, {
        headers: { 'content-type': 'application/json' },
        ...options
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res.json();
    };

    const send = (path, method, body) =>
      api(path, { method, body: body === undefined ? undefined : JSON.stringify(body) })
        .then(render)
        .catch((err) => setStatus(err.message, 'error'));

    const ring = (percent) => {
      const size = 44, stroke = 6, r = (size - stroke) / 2, c = 2 * Math.PI * r;
      const offset = c - (percent / 100) * c;
      return `<svg viewBox="0 0 ${size} ${size}" width="${size}" height="${size}">
        <circle cx="${size / 2}" cy="${size / 2}" r="${r}" fill="none" stroke="rgba(47,72,88,.12)" stroke-width="${stroke}" />
        <circle cx="${size / 2}" cy="${size / 2}" r="${r}" fill="none" stroke="var(--done)" stroke-width="${stroke}"
          stroke-linecap="round" stroke-dasharray="${c}" stroke-dashoffset="${offset}"
          transform="rotate(-90 ${size / 2} ${size / 2})" />
      </svg>`;
    };

    const escape = (text) => String(text).replace(/[&<>"']/g, (ch) => `&#${ch.charCodeAt(0)};`);

    const renderKpis = () => {
      $('overall-pct').textContent = `${view.overall.percent}%`;
      $('done-count').textContent = view.overall.done;
      $('total-count').textContent = view.overall.total;
      $('perfect-days').textContent = view.overall.perfect_days;
    };

    const renderWeeks = () => {
      $('weeks').innerHTML = view.weeks.map((week) => `
        <div class="week-card">${ring(week.percent)}
          <div><div>${week.label}</div><strong>${week.percent}%</strong></div>
        </div>`).join('');
    };

    const renderHabits = () => {
      const last = view.habits.length - 1;
      $('habit-list').innerHTML = view.habits.map((habit, idx) => `
        <div class="habit-item">
          <div>${escape(habit.icon)}</div>
          <div>
            <div>${escape(habit.name)}</div>
            <div class="meta">Streak ${habit.current_streak} · best ${habit.best_streak} ·
              this week ${habit.week_done}/${habit.weekly_goal}${habit.reminder_enabled ? ` · ⏰ ${escape(habit.reminder_time)}` : ''}</div>
          </div>
          <strong>${habit.percent}%</strong>
          <div class="actions">
            <button class="icon-btn" data-move="${idx - 1}" data-id="${escape(habit.id)}" ${idx === 0 ? 'disabled' : ''}>↑</button>
            <button class="icon-btn" data-move="${idx + 1}" data-id="${escape(habit.id)}" ${idx === last ? 'disabled' : ''}>↓</button>
            <button class="icon-btn" data-edit="${escape(habit.id)}">✎</button>
            <button class="icon-btn" data-delete="${escape(habit.id)}">🗑</button>
          </div>
        </div>`).join('');
    };

    const renderTable = () => {
      const head = view.days.map((d) => `<th class="${d.weekend ? 'weekend' : ''}">${d.day}</th>`).join('');
      const rows = view.habits.map((habit) => {
        const cells = habit.checks.map((done, i) => `<td><input type="checkbox" data-habit="${escape(habit.id)}"
          data-day="${i + 1}" ${done ? 'checked' : ''} /></td>`).join('');
        return `<tr><td>${escape(habit.icon)} ${escape(habit.name)}</td>${cells}<td>${habit.percent}%</td></tr>`;
      }).join('');
      const foot = view.days.map((d) => `<td>${d.percent === null ? '-' : `${d.percent}%`}</td>`).join('');
      $('tracker').innerHTML = `
        <thead><tr><th>Habit</th>${head}<th>Progress</th></tr></thead>
        <tbody>${rows}</tbody>
        <tfoot><tr><td>Day total</td>${foot}<td>${view.overall.percent}%</td></tr></tfoot>`;
    };

    const render = (next) => {
      view = next;
      $('title').textContent = view.title;
      $('month-select').value = String(view.month);
      $('year-input').value = String(view.year);
      renderKpis();
      renderWeeks();
      renderHabits();
      renderTable();
    };

    const openDialog = (habit) => {
      $('dialog-title').textContent = habit ? 'Edit habit' : 'Add habit';
      $('habit-id').value = habit ? habit.id : '';
      $('habit-name').value = habit ? habit.name : '';
      $('habit-icon').value = habit ? habit.icon : '';
      $('habit-reminder').checked = habit ? habit.reminder_enabled : false;
      $('habit-time').value = habit ? habit.reminder_time : '20:00';
      $('habit-goal').value = habit ? habit.weekly_goal : 4;
      dialog.showModal();
    };

    dialog.addEventListener('close', () => {
      if (dialog.returnValue !== 'default') {
        return;
      }
      const id = $('habit-id').value;
      const form = {
        name: $('habit-name').value,
        icon: $('habit-icon').value,
        reminder_enabled: $('habit-reminder').checked,
        reminder_time: $('habit-time').value,
        weekly_goal: Number($('habit-goal').value)
      };
      if (!form.name.trim() && !id) {
        return;
      }
      send(id ? `/api/habits/${encodeURIComponent(id)}` : '/api/habits', id ? 'PUT' : 'POST', form);
    });

    $('habit-list').addEventListener('click', (event) => {
      const btn = event.target.closest('button');
      if (!btn) {
        return;
      }
      if (btn.dataset.move !== undefined) {
        send(`/api/habits/${encodeURIComponent(btn.dataset.id)}/move`, 'POST', { to: Number(btn.dataset.move) });
      } else if (btn.dataset.edit) {
        openDialog(view.habits.find((h) => h.id === btn.dataset.edit));
      } else if (btn.dataset.delete) {
        const habit = view.habits.find((h) => h.id === btn.dataset.delete);
        if (confirm(`Delete habit "${habit.name}"?`)) {
          send(`/api/habits/${encodeURIComponent(habit.id)}`, 'DELETE');
        }
      }
    });

    $('tracker').addEventListener('change', (event) => {
      const input = event.target;
      if (!input.dataset.habit) {
        return;
      }
      send('/api/checks', 'POST', {
        habit_id: input.dataset.habit,
        day: Number(input.dataset.day),
        done: input.checked
      });
    });

    const changeView = () => send('/api/view', 'POST', {
      year: Number($('year-input').value),
      month: Number($('month-select').value)
    });

    $('month-select').innerHTML = MONTHS.map((name, idx) => `<option value="${idx}">${name}</option>`).join('');
    $('month-select').addEventListener('change', changeView);
    $('year-input').addEventListener('change', changeView);
    $('today-btn').addEventListener('click', () => send('/api/view/today', 'POST'));
    $('add-btn').addEventListener('click', () => openDialog(null));
    $('print-btn').addEventListener('click', () => window.print());
    $('export-btn').addEventListener('click', () => { window.location.href = '/api/export'; });

    $('import-input').addEventListener('change', async (event) => {
      const file = event.target.files[0];
      if (!file) {
        return;
      }
      try {
        render(await api('/api/import', { method: 'POST', body: await file.text() }));
        setStatus('Imported', 'ok');
      } catch (err) {
        setStatus(`Import failed: ${err.message}`, 'error');
      } finally {
        event.target.value = '';
      }
    });

    $('reset-btn').addEventListener('click', () => {
      if (confirm('Reset all data? This deletes the saved state.')) {
        send('/api/reset', 'POST');
      }
    });

    api('/api/month').then(render).catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"##;
